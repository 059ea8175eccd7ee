//! Repository for the `attachment` table.

use podium_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::attachment::{Attachment, NewAttachment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, presentation_id, filename";

/// Provides row-level operations for attachments.
pub struct AttachmentRepo;

impl AttachmentRepo {
    /// Insert a new attachment row, returning it.
    pub async fn create(
        pool: &SqlitePool,
        input: &NewAttachment,
    ) -> Result<Attachment, sqlx::Error> {
        let query = format!(
            "INSERT INTO attachment (presentation_id, filename)
             VALUES (?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(input.presentation_id)
            .bind(&input.filename)
            .fetch_one(pool)
            .await
    }

    /// Find an attachment by id.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Attachment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attachment WHERE id = ?");
        sqlx::query_as::<_, Attachment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a presentation's attachments in insertion order.
    pub async fn list_by_presentation(
        pool: &SqlitePool,
        presentation_id: DbId,
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM attachment WHERE presentation_id = ? ORDER BY id");
        sqlx::query_as::<_, Attachment>(&query)
            .bind(presentation_id)
            .fetch_all(pool)
            .await
    }

    /// List every attachment, ordered by owner then insertion.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Attachment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attachment ORDER BY presentation_id, id");
        sqlx::query_as::<_, Attachment>(&query)
            .fetch_all(pool)
            .await
    }

    /// Delete one attachment row, returning it so the caller can remove the
    /// backing file. `None` if no row with the given id exists.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<Option<Attachment>, sqlx::Error> {
        let query = format!("DELETE FROM attachment WHERE id = ? RETURNING {COLUMNS}");
        sqlx::query_as::<_, Attachment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
