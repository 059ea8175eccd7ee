//! Login session model and DTOs.

use podium_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// One server-side login session.
///
/// `token_hash` is the SHA-256 hex digest of the opaque bearer token; the
/// plaintext is only ever held by the client.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub token_hash: String,
    pub username: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

/// DTO for creating a session at login.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub token_hash: String,
    pub username: String,
    pub expires_at: Timestamp,
}
