//! Flat-file JSON record store.
//!
//! The whole collection lives in one pretty-printed JSON array; every
//! operation reads it, applies the change in memory, and writes it back.
//! There is no cross-process locking: concurrent writers race and the last
//! write wins.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use podium_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::models::attachment::Attachment;
use crate::models::presentation::{NewPresentation, Presentation, UpdatePresentation};

use super::{RecordStore, StoreError};

/// On-disk shape of one record: attachments are bare stored filenames.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonRecord {
    id: DbId,
    title: String,
    presenters: String,
    scheduled: NaiveDate,
    time_range: String,
    notes: String,
    #[serde(default)]
    attachments: Vec<String>,
}

impl JsonRecord {
    /// The positional index doubles as the attachment id in this backend.
    fn to_presentation(&self) -> Presentation {
        Presentation {
            id: self.id,
            title: self.title.clone(),
            presenters: self.presenters.clone(),
            scheduled: self.scheduled,
            time_range: self.time_range.clone(),
            notes: self.notes.clone(),
            attachments: self
                .attachments
                .iter()
                .enumerate()
                .map(|(index, filename)| Attachment {
                    id: index as DbId,
                    presentation_id: self.id,
                    filename: filename.clone(),
                })
                .collect(),
        }
    }
}

/// Record store backed by a single JSON file.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse the whole collection. A missing file is an empty
    /// collection; a malformed file is a terminal parse error.
    async fn load(&self) -> Result<Vec<JsonRecord>, StoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&raw)?)
    }

    async fn save(&self, records: &[JsonRecord]) -> Result<(), StoreError> {
        let raw = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonStore {
    async fn get_all(&self) -> Result<Vec<Presentation>, StoreError> {
        let records = self.load().await?;
        Ok(records.iter().map(JsonRecord::to_presentation).collect())
    }

    async fn get(&self, id: DbId) -> Result<Option<Presentation>, StoreError> {
        let records = self.load().await?;
        Ok(records
            .iter()
            .find(|r| r.id == id)
            .map(JsonRecord::to_presentation))
    }

    async fn create(&self, input: NewPresentation) -> Result<Presentation, StoreError> {
        let mut records = self.load().await?;

        // The next id follows the last element, not the collection maximum.
        let next_id = records.last().map(|r| r.id + 1).unwrap_or(1);

        let record = JsonRecord {
            id: next_id,
            title: input.title,
            presenters: input.presenters,
            scheduled: input.scheduled,
            time_range: input.time_range,
            notes: input.notes,
            attachments: input.attachments,
        };
        let created = record.to_presentation();
        records.push(record);
        self.save(&records).await?;
        Ok(created)
    }

    async fn update(&self, input: UpdatePresentation) -> Result<Option<Presentation>, StoreError> {
        let mut records = self.load().await?;
        let Some(record) = records.iter_mut().find(|r| r.id == input.id) else {
            return Ok(None);
        };

        record.title = input.title;
        record.presenters = input.presenters;
        record.scheduled = input.scheduled;
        record.time_range = input.time_range;
        record.notes = input.notes;
        record.attachments.extend(input.new_attachments);

        let updated = record.to_presentation();
        self.save(&records).await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: DbId) -> Result<Option<Presentation>, StoreError> {
        let mut records = self.load().await?;
        let Some(position) = records.iter().position(|r| r.id == id) else {
            return Ok(None);
        };
        let removed = records.remove(position);
        self.save(&records).await?;
        Ok(Some(removed.to_presentation()))
    }
}
