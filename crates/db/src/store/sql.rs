//! SQL-backed record store.

use std::collections::HashMap;

use async_trait::async_trait;
use podium_core::types::DbId;

use crate::models::attachment::{Attachment, NewAttachment};
use crate::models::presentation::{NewPresentation, Presentation, UpdatePresentation};
use crate::repositories::{AttachmentRepo, PresentationRepo};
use crate::DbPool;

use super::{RecordStore, StoreError};

/// Record store backed by the `presentation` and `attachment` tables.
///
/// Ids come from SQLite's auto-increment, so deleted ids are never reused.
pub struct SqlStore {
    pool: DbPool,
}

impl SqlStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn insert_attachments(
        &self,
        presentation_id: DbId,
        filenames: &[String],
    ) -> Result<Vec<Attachment>, StoreError> {
        let mut attachments = Vec::with_capacity(filenames.len());
        for filename in filenames {
            let input = NewAttachment {
                presentation_id,
                filename: filename.clone(),
            };
            attachments.push(AttachmentRepo::create(&self.pool, &input).await?);
        }
        Ok(attachments)
    }
}

#[async_trait]
impl RecordStore for SqlStore {
    async fn get_all(&self) -> Result<Vec<Presentation>, StoreError> {
        let rows = PresentationRepo::list_all(&self.pool).await?;

        // One attachment query for the whole listing instead of one per row.
        let mut by_owner: HashMap<DbId, Vec<Attachment>> = HashMap::new();
        for attachment in AttachmentRepo::list_all(&self.pool).await? {
            by_owner
                .entry(attachment.presentation_id)
                .or_default()
                .push(attachment);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let own = by_owner.remove(&row.id).unwrap_or_default();
                row.with_attachments(own)
            })
            .collect())
    }

    async fn get(&self, id: DbId) -> Result<Option<Presentation>, StoreError> {
        let Some(row) = PresentationRepo::find_by_id(&self.pool, id).await? else {
            return Ok(None);
        };
        let attachments = AttachmentRepo::list_by_presentation(&self.pool, id).await?;
        Ok(Some(row.with_attachments(attachments)))
    }

    async fn create(&self, input: NewPresentation) -> Result<Presentation, StoreError> {
        let row = PresentationRepo::create(&self.pool, &input).await?;
        let attachments = self.insert_attachments(row.id, &input.attachments).await?;
        Ok(row.with_attachments(attachments))
    }

    async fn update(&self, input: UpdatePresentation) -> Result<Option<Presentation>, StoreError> {
        let Some(row) = PresentationRepo::update(&self.pool, &input).await? else {
            return Ok(None);
        };
        self.insert_attachments(row.id, &input.new_attachments)
            .await?;
        let attachments = AttachmentRepo::list_by_presentation(&self.pool, row.id).await?;
        Ok(Some(row.with_attachments(attachments)))
    }

    async fn delete(&self, id: DbId) -> Result<Option<Presentation>, StoreError> {
        let Some(record) = self.get(id).await? else {
            return Ok(None);
        };
        PresentationRepo::delete(&self.pool, id).await?;
        Ok(Some(record))
    }
}
