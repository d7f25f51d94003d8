//! Live integration tests for shopfront-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database from the sqlx
//! test harness, so `DATABASE_URL` must point at a server that allows
//! creating databases. Run with `cargo test -p shopfront-db -- --ignored`.

use shopfront_core::Theme;
use shopfront_db::{get_user_theme, upsert_user_theme};

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn get_user_theme_missing_row_is_none(pool: sqlx::PgPool) {
    assert_eq!(get_user_theme(&pool, 404).await.unwrap(), None);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn new_row_defaults_to_light(pool: sqlx::PgPool) {
    sqlx::query("INSERT INTO users (id) VALUES (1)")
        .execute(&pool)
        .await
        .unwrap();
    assert_eq!(get_user_theme(&pool, 1).await.unwrap(), Some(Theme::Light));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn upsert_updates_existing_row(pool: sqlx::PgPool) {
    upsert_user_theme(&pool, 2, Theme::Light).await.unwrap();

    let stored = upsert_user_theme(&pool, 2, Theme::Dark).await.unwrap();
    assert_eq!(stored, Theme::Dark);
    assert_eq!(get_user_theme(&pool, 2).await.unwrap(), Some(Theme::Dark));

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = 2")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn upsert_creates_missing_row(pool: sqlx::PgPool) {
    upsert_user_theme(&pool, 3, Theme::Dark).await.unwrap();
    assert_eq!(get_user_theme(&pool, 3).await.unwrap(), Some(Theme::Dark));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn check_constraint_rejects_unknown_theme(pool: sqlx::PgPool) {
    let result = sqlx::query("INSERT INTO users (id, theme) VALUES (9, 'sepia')")
        .execute(&pool)
        .await;
    assert!(result.is_err());
}
