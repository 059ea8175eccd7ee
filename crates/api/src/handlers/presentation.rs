//! Handlers for the `/presentations` resource.
//!
//! Create and edit accept `multipart/form-data` submissions carrying the
//! form fields plus any number of file parts under the `attachments` field,
//! mirroring a browser form with a multi-file input.

use axum::extract::multipart::Field;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use podium_core::error::CoreError;
use podium_core::forms::{validate_form, PresentationForm};
use podium_core::types::DbId;
use podium_db::models::presentation::{NewPresentation, Presentation, UpdatePresentation};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Multipart field carrying uploaded attachment files.
const ATTACHMENTS_FIELD: &str = "attachments";

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/presentations
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Presentation>>> {
    let presentations = state.store.get_all().await?;
    Ok(Json(presentations))
}

/// GET /api/v1/presentations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Presentation>> {
    let presentation = state.store.get(id).await?.ok_or(AppError::Core(
        CoreError::NotFound {
            entity: "Presentation",
            id,
        },
    ))?;
    Ok(Json(presentation))
}

/// POST /api/v1/presentations
///
/// Create a presentation from a multipart form. Validation failures return
/// 400 with every message and nothing is written.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Presentation>)> {
    let (form, files) = read_form(multipart).await?;
    let scheduled = validated_date(&form)?;

    let attachments = save_uploads(&state, files).await?;

    let input = NewPresentation {
        title: form.title,
        presenters: form.presenters,
        scheduled,
        time_range: form.time_range,
        notes: form.notes,
        attachments,
    };
    let created = state.store.create(input).await?;

    tracing::info!(id = created.id, "Created presentation");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/v1/presentations/{id}
///
/// Overwrite the scalar fields and append any newly uploaded attachments.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Presentation>> {
    let (form, files) = read_form(multipart).await?;
    let scheduled = validated_date(&form)?;

    // Reject unknown ids before writing any files.
    if state.store.get(id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Presentation",
            id,
        }));
    }

    let new_attachments = save_uploads(&state, files).await?;

    let input = UpdatePresentation {
        id,
        title: form.title,
        presenters: form.presenters,
        scheduled,
        time_range: form.time_range,
        notes: form.notes,
        new_attachments,
    };
    let updated = state.store.update(input).await?.ok_or(AppError::Core(
        CoreError::NotFound {
            entity: "Presentation",
            id,
        },
    ))?;

    tracing::info!(id, "Updated presentation");
    Ok(Json(updated))
}

/// DELETE /api/v1/presentations/{id}
///
/// Removes the record, its attachment rows, and their backing files.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = state.store.delete(id).await?.ok_or(AppError::Core(
        CoreError::NotFound {
            entity: "Presentation",
            id,
        },
    ))?;

    let stored_names: Vec<&str> = removed.attachments.iter().map(|a| a.filename.as_str()).collect();
    state
        .uploads
        .delete_all(stored_names)
        .await
        .map_err(|e| AppError::InternalError(format!("Attachment cleanup error: {e}")))?;

    tracing::info!(id, attachments = removed.attachments.len(), "Deleted presentation");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Collect form fields and attachment uploads from a multipart submission.
///
/// Unknown fields are ignored; missing text fields validate as empty, so a
/// submission with absent fields still reports every applicable message.
async fn read_form(
    mut multipart: Multipart,
) -> Result<(PresentationForm, Vec<(String, Vec<u8>)>), AppError> {
    let mut form = PresentationForm::default();
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => form.title = read_text(field).await?,
            "presenters" => form.presenters = read_text(field).await?,
            "scheduled" => form.scheduled = read_text(field).await?,
            "time_range" => form.time_range = read_text(field).await?,
            "notes" => form.notes = read_text(field).await?,
            ATTACHMENTS_FIELD => {
                let original = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // Browsers send an empty part when no file was chosen.
                if !original.is_empty() || !data.is_empty() {
                    files.push((original, data.to_vec()));
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok((form, files))
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Run the form rules, returning the parsed date on success.
fn validated_date(form: &PresentationForm) -> Result<NaiveDate, AppError> {
    validate_form(form).map_err(AppError::FormInvalid)?;
    form.scheduled_date()
        .ok_or_else(|| AppError::InternalError("Date unparseable after validation".into()))
}

/// Store uploaded files, returning stored names in submission order.
async fn save_uploads(
    state: &AppState,
    files: Vec<(String, Vec<u8>)>,
) -> Result<Vec<String>, AppError> {
    let mut stored = Vec::with_capacity(files.len());
    for (original, data) in files {
        let name = state
            .uploads
            .save(&original, &data)
            .await
            .map_err(|e| AppError::InternalError(format!("Upload write error: {e}")))?;
        stored.push(name);
    }
    Ok(stored)
}
