//! The record-store contract over presentation records.
//!
//! Two backends implement the same contract: [`SqlStore`] (row-level SQLite
//! statements, the served backend) and [`JsonStore`] (whole-collection
//! read-modify-write against a single JSON file). The shared test suite in
//! `tests/store_contract.rs` pins the interchange semantics.

mod json;
mod sql;

pub use json::JsonStore;
pub use sql::SqlStore;

use async_trait::async_trait;
use podium_core::types::DbId;

use crate::models::presentation::{NewPresentation, Presentation, UpdatePresentation};

/// Errors surfaced by a record store.
///
/// A load/parse failure of the backing file or database is terminal for the
/// request; nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Record file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record file parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Collection-level contract over presentation records.
///
/// Operations on a non-existent id return `None`; they never fail. How ids
/// are assigned is backend-specific (auto-increment vs. last-id + 1), but a
/// fresh store always hands out ids not currently in use.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records with their attachments, in insertion order.
    async fn get_all(&self) -> Result<Vec<Presentation>, StoreError>;

    /// One record with its attachments.
    async fn get(&self, id: DbId) -> Result<Option<Presentation>, StoreError>;

    /// Persist a new record, assigning its id.
    async fn create(&self, input: NewPresentation) -> Result<Presentation, StoreError>;

    /// Overwrite the scalar fields of an existing record and append the new
    /// attachments, returning the updated record.
    async fn update(&self, input: UpdatePresentation) -> Result<Option<Presentation>, StoreError>;

    /// Remove a record together with its attachment entries, returning the
    /// removed record so the caller can delete the backing files.
    async fn delete(&self, id: DbId) -> Result<Option<Presentation>, StoreError>;
}
