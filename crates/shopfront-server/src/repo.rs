//! Storage seam for user theme preferences.

use async_trait::async_trait;
use shopfront_core::Theme;
use shopfront_db::DbError;
use sqlx::PgPool;

#[async_trait]
pub trait ThemeRepository: Send + Sync {
    /// The stored theme, or `None` when the user has no profile row.
    async fn find_theme(&self, user_id: i64) -> Result<Option<Theme>, DbError>;

    /// Stores `theme`, creating the profile row if needed.
    async fn save_theme(&self, user_id: i64, theme: Theme) -> Result<Theme, DbError>;

    async fn health_check(&self) -> Result<(), DbError>;
}

/// Postgres-backed repository over the `users` table.
pub struct PgThemeRepository {
    pool: PgPool,
}

impl PgThemeRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThemeRepository for PgThemeRepository {
    async fn find_theme(&self, user_id: i64) -> Result<Option<Theme>, DbError> {
        shopfront_db::get_user_theme(&self.pool, user_id).await
    }

    async fn save_theme(&self, user_id: i64, theme: Theme) -> Result<Theme, DbError> {
        shopfront_db::upsert_user_theme(&self.pool, user_id, theme).await
    }

    async fn health_check(&self) -> Result<(), DbError> {
        shopfront_db::health_check(&self.pool).await
    }
}

#[cfg(test)]
pub use memory::InMemoryThemeRepository;
