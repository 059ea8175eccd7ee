//! Route definitions for the `/attachments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::attachment;
use crate::state::AppState;

/// Routes mounted at `/attachments`.
///
/// ```text
/// GET    /{id}  -> download (requires auth)
/// DELETE /{id}  -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(attachment::download).delete(attachment::delete),
    )
}
