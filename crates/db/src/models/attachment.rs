//! Attachment entity model and DTOs.

use podium_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One stored file belonging to a presentation.
///
/// `filename` is the generated on-disk name, not the name the client
/// uploaded under. In the flat-file backend `id` is the positional index of
/// the attachment within its presentation.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Attachment {
    pub id: DbId,
    pub presentation_id: DbId,
    pub filename: String,
}

/// DTO for inserting one attachment row.
#[derive(Debug, Clone)]
pub struct NewAttachment {
    pub presentation_id: DbId,
    pub filename: String,
}
