//! Presentation entity model and DTOs.

use chrono::NaiveDate;
use podium_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::attachment::Attachment;

/// A full presentation record: the scalar fields plus its attachments in
/// insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    pub id: DbId,
    pub title: String,
    pub presenters: String,
    /// Serialized as `YYYY-MM-DD` on the wire and on disk.
    pub scheduled: NaiveDate,
    pub time_range: String,
    pub notes: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Bare row from the `presentation` table (no attachments).
#[derive(Debug, Clone, FromRow)]
pub struct PresentationRow {
    pub id: DbId,
    pub title: String,
    pub presenters: String,
    pub scheduled: NaiveDate,
    pub time_range: String,
    pub notes: String,
}

impl PresentationRow {
    /// Attach the dependent rows to form the full record.
    pub fn with_attachments(self, attachments: Vec<Attachment>) -> Presentation {
        Presentation {
            id: self.id,
            title: self.title,
            presenters: self.presenters,
            scheduled: self.scheduled,
            time_range: self.time_range,
            notes: self.notes,
            attachments,
        }
    }
}

/// Fields for creating a presentation. The id is assigned by the backend.
///
/// `attachments` are the stored filenames of uploads that were already
/// written to disk.
#[derive(Debug, Clone)]
pub struct NewPresentation {
    pub title: String,
    pub presenters: String,
    pub scheduled: NaiveDate,
    pub time_range: String,
    pub notes: String,
    pub attachments: Vec<String>,
}

/// Fields for editing a presentation by id.
///
/// Scalar fields are overwritten wholesale; `new_attachments` are appended
/// after the record's existing attachments.
#[derive(Debug, Clone)]
pub struct UpdatePresentation {
    pub id: DbId,
    pub title: String,
    pub presenters: String,
    pub scheduled: NaiveDate,
    pub time_range: String,
    pub notes: String,
    pub new_attachments: Vec<String>,
}
