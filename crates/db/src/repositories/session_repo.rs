//! Repository for the `session` table.

use chrono::Utc;
use podium_core::types::Timestamp;
use sqlx::SqlitePool;

use crate::models::session::{CreateSession, Session};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, token_hash, username, created_at, expires_at";

/// Provides operations for login sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO session (token_hash, username, created_at, expires_at)
             VALUES (?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(&input.token_hash)
            .bind(&input.username)
            .bind(Utc::now())
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find the unexpired session matching a token hash, if any.
    pub async fn find_active_by_token_hash(
        pool: &SqlitePool,
        token_hash: &str,
        now: Timestamp,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM session WHERE token_hash = ? AND expires_at > ?");
        sqlx::query_as::<_, Session>(&query)
            .bind(token_hash)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Delete the session matching a token hash (logout).
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete_by_token_hash(
        pool: &SqlitePool,
        token_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM session WHERE token_hash = ?")
            .bind(token_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every session that expired before `now`, returning the count.
    pub async fn purge_expired(pool: &SqlitePool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM session WHERE expires_at <= ?")
            .bind(now)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
