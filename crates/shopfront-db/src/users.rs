//! Theme queries against the `users` table.

use shopfront_core::Theme;
use sqlx::PgPool;

use crate::DbError;

fn parse_theme(raw: &str) -> Result<Theme, DbError> {
    raw.parse::<Theme>()
        .map_err(|_| DbError::InvalidTheme(raw.to_owned()))
}

/// Returns the stored theme for user `id`, or `None` if no row exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, or [`DbError::InvalidTheme`]
/// if the stored value cannot be parsed.
pub async fn get_user_theme(pool: &PgPool, id: i64) -> Result<Option<Theme>, DbError> {
    let raw = sqlx::query_scalar::<_, String>("SELECT theme FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    raw.as_deref().map(parse_theme).transpose()
}

/// Sets the theme for user `id`, creating the row if it does not exist.
/// Returns the stored value.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_user_theme(pool: &PgPool, id: i64, theme: Theme) -> Result<Theme, DbError> {
    let stored = sqlx::query_scalar::<_, String>(
        "INSERT INTO users (id, theme) VALUES ($1, $2) \
         ON CONFLICT (id) DO UPDATE SET theme = EXCLUDED.theme, updated_at = NOW() \
         RETURNING theme",
    )
    .bind(id)
    .bind(theme.as_str())
    .fetch_one(pool)
    .await?;

    tracing::debug!(user_id = id, theme = %stored, "stored user theme");
    parse_theme(&stored)
}
