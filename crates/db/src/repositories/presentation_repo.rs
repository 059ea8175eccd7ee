//! Repository for the `presentation` table.

use podium_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::presentation::{NewPresentation, PresentationRow, UpdatePresentation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, presenters, scheduled, time_range, notes";

/// Provides row-level operations for presentations.
pub struct PresentationRepo;

impl PresentationRepo {
    /// Insert a new presentation, returning the created row.
    ///
    /// Attachment filenames on `input` are NOT inserted here; see
    /// [`crate::repositories::AttachmentRepo::create`].
    pub async fn create(
        pool: &SqlitePool,
        input: &NewPresentation,
    ) -> Result<PresentationRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO presentation (title, presenters, scheduled, time_range, notes)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PresentationRow>(&query)
            .bind(&input.title)
            .bind(&input.presenters)
            .bind(input.scheduled)
            .bind(&input.time_range)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// List all presentations in id order.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<PresentationRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM presentation ORDER BY id");
        sqlx::query_as::<_, PresentationRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a presentation by id.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<PresentationRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM presentation WHERE id = ?");
        sqlx::query_as::<_, PresentationRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the scalar fields of a presentation.
    ///
    /// Returns `None` if no row with the given id exists.
    pub async fn update(
        pool: &SqlitePool,
        input: &UpdatePresentation,
    ) -> Result<Option<PresentationRow>, sqlx::Error> {
        let query = format!(
            "UPDATE presentation
             SET title = ?, presenters = ?, scheduled = ?, time_range = ?, notes = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PresentationRow>(&query)
            .bind(&input.title)
            .bind(&input.presenters)
            .bind(input.scheduled)
            .bind(&input.time_range)
            .bind(&input.notes)
            .bind(input.id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a presentation and its attachment rows in one transaction.
    ///
    /// Returns `true` if the presentation existed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM attachment WHERE presentation_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM presentation WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
