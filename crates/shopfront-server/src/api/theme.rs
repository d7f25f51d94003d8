use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use shopfront_core::Theme;

use super::{map_db_error, ApiError, AppState};
use crate::middleware::{AuthenticatedUser, RequestId};

/// Body of both theme routes: `{"theme": "light" | "dark"}`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct ThemeBody {
    pub theme: Theme,
}

#[derive(Debug, Deserialize)]
pub(super) struct ThemeUpdate {
    theme: String,
}

pub(super) async fn get_theme(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ThemeBody>, ApiError> {
    match state.repo.find_theme(user.user_id).await {
        Ok(Some(theme)) => Ok(Json(ThemeBody { theme })),
        Ok(None) => Err(ApiError::new(req_id.0, "not_found", "user profile not found")),
        Err(e) => Err(map_db_error(req_id.0, &e)),
    }
}

pub(super) async fn put_theme(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<ThemeUpdate>, JsonRejection>,
) -> Result<Json<ThemeBody>, ApiError> {
    let Json(update) = body.map_err(|e| {
        ApiError::new(
            req_id.0.clone(),
            "validation_error",
            format!("invalid request body: {}", e.body_text()),
        )
    })?;

    let theme = update.theme.parse::<Theme>().map_err(|e| {
        ApiError::new(req_id.0.clone(), "validation_error", e.to_string())
    })?;

    let stored = state
        .repo
        .save_theme(user.user_id, theme)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(user_id = user.user_id, theme = %stored, "user theme updated");
    Ok(Json(ThemeBody { theme: stored }))
}
