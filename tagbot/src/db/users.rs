//! Per-user stats persistence
//!
//! Counters are monotonic and survive session teardown: `files_received`
//! increments when an upload is accepted, `tag_edits` when a commit
//! completes.

use sqlx::{Row, SqlitePool};
use tagbot_common::Result;

/// Stats row for one user identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub user_id: i64,
    pub username: Option<String>,
    pub files_received: i64,
    pub tag_edits: i64,
}

/// Create the user's row if missing; refresh the username when the
/// transport supplies one.
pub async fn ensure_user(pool: &SqlitePool, user_id: i64, username: Option<&str>) -> Result<()> {
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO users (user_id, username, files_received, tag_edits, created_at, updated_at)
        VALUES (?, ?, 0, 0, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            username = COALESCE(excluded.username, users.username),
            updated_at = excluded.updated_at
        "#,
    )
    .bind(user_id)
    .bind(username)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Count one accepted audio upload
pub async fn increment_files_received(pool: &SqlitePool, user_id: i64) -> Result<()> {
    increment_counter(pool, user_id, "files_received").await
}

/// Count one completed tag edit
pub async fn increment_tag_edits(pool: &SqlitePool, user_id: i64) -> Result<()> {
    increment_counter(pool, user_id, "tag_edits").await
}

async fn increment_counter(pool: &SqlitePool, user_id: i64, column: &str) -> Result<()> {
    // column is one of two compile-time literals, never user input
    let query = format!(
        "UPDATE users SET {column} = {column} + 1, updated_at = ? WHERE user_id = ?"
    );

    sqlx::query(&query)
        .bind(chrono::Utc::now().to_rfc3339())
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Load a user's stats row
pub async fn get_stats(pool: &SqlitePool, user_id: i64) -> Result<Option<UserStats>> {
    let row = sqlx::query(
        "SELECT user_id, username, files_received, tag_edits FROM users WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| UserStats {
        user_id: row.get("user_id"),
        username: row.get("username"),
        files_received: row.get("files_received"),
        tag_edits: row.get("tag_edits"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        crate::db::init_tables(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn ensure_user_is_idempotent() {
        let pool = test_pool().await;

        ensure_user(&pool, 1, Some("alice")).await.unwrap();
        ensure_user(&pool, 1, Some("alice")).await.unwrap();

        let stats = get_stats(&pool, 1).await.unwrap().unwrap();
        assert_eq!(stats.username.as_deref(), Some("alice"));
        assert_eq!(stats.files_received, 0);
        assert_eq!(stats.tag_edits, 0);
    }

    #[tokio::test]
    async fn username_refresh_keeps_counters() {
        let pool = test_pool().await;

        ensure_user(&pool, 1, Some("old-name")).await.unwrap();
        increment_files_received(&pool, 1).await.unwrap();
        ensure_user(&pool, 1, Some("new-name")).await.unwrap();

        let stats = get_stats(&pool, 1).await.unwrap().unwrap();
        assert_eq!(stats.username.as_deref(), Some("new-name"));
        assert_eq!(stats.files_received, 1);
    }

    #[tokio::test]
    async fn missing_username_does_not_clear_stored_one() {
        let pool = test_pool().await;

        ensure_user(&pool, 1, Some("alice")).await.unwrap();
        ensure_user(&pool, 1, None).await.unwrap();

        let stats = get_stats(&pool, 1).await.unwrap().unwrap();
        assert_eq!(stats.username.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn counters_increment_independently() {
        let pool = test_pool().await;

        ensure_user(&pool, 1, None).await.unwrap();
        increment_files_received(&pool, 1).await.unwrap();
        increment_files_received(&pool, 1).await.unwrap();
        increment_tag_edits(&pool, 1).await.unwrap();

        let stats = get_stats(&pool, 1).await.unwrap().unwrap();
        assert_eq!(stats.files_received, 2);
        assert_eq!(stats.tag_edits, 1);
    }

    #[tokio::test]
    async fn unknown_user_has_no_stats() {
        let pool = test_pool().await;
        assert_eq!(get_stats(&pool, 42).await.unwrap(), None);
    }
}
