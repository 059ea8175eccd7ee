//! Handlers for the `/attachments` resource (download and delete).

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use podium_core::error::CoreError;
use podium_core::types::DbId;
use podium_db::repositories::AttachmentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// GET /api/v1/attachments/{id}
///
/// Download the stored file. Any authenticated user may download; the file
/// is served under its stored name.
pub async fn download(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let attachment = AttachmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attachment",
            id,
        }))?;

    let bytes = state
        .uploads
        .read(&attachment.filename)
        .await
        .map_err(|e| AppError::InternalError(format!("Attachment read error: {e}")))?
        // A row without its backing file reads as not found, not as a crash.
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attachment",
            id,
        }))?;

    let headers = [
        (
            header::CONTENT_TYPE,
            "application/octet-stream".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", attachment.filename),
        ),
    ];
    Ok((headers, bytes).into_response())
}

/// DELETE /api/v1/attachments/{id}
///
/// Remove one attachment row and its backing file.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = AttachmentRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attachment",
            id,
        }))?;

    state
        .uploads
        .delete(&removed.filename)
        .await
        .map_err(|e| AppError::InternalError(format!("Attachment cleanup error: {e}")))?;

    tracing::info!(id, filename = %removed.filename, "Deleted attachment");
    Ok(StatusCode::NO_CONTENT)
}
