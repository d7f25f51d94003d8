//! User theme routes for `ContentClient`.

use reqwest::Method;
use shopfront_core::Theme;

use crate::error::ContentError;
use crate::types::ThemePayload;

use super::ContentClient;

const THEME_PATH: &str = "/users/me/theme";

impl ContentClient {
    /// `GET /users/me/theme` for the user owning `token`.
    ///
    /// # Errors
    ///
    /// - [`ContentError::Unauthorized`] if the token is rejected.
    /// - [`ContentError::InvalidTheme`] if the stored value is not `light`/`dark`.
    /// - Any transport, status, or decoding error.
    pub async fn get_user_theme(&self, token: &str) -> Result<Theme, ContentError> {
        let url = self.root_url(THEME_PATH)?;
        let payload: ThemePayload = self
            .execute(Method::GET, url, Some(token), None, "user theme")
            .await?;
        parse_theme(&payload)
    }

    /// `PUT /users/me/theme` with `{theme}`; returns the echoed value.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_user_theme`].
    pub async fn set_user_theme(&self, theme: Theme, token: &str) -> Result<Theme, ContentError> {
        let url = self.root_url(THEME_PATH)?;
        let body = serde_json::json!({ "theme": theme });
        let payload: ThemePayload = self
            .execute(Method::PUT, url, Some(token), Some(&body), "user theme update")
            .await?;
        parse_theme(&payload)
    }
}

fn parse_theme(payload: &ThemePayload) -> Result<Theme, ContentError> {
    payload
        .theme
        .parse::<Theme>()
        .map_err(|_| ContentError::InvalidTheme(payload.theme.clone()))
}
