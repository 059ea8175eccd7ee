//! Route definitions for the `/presentations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::presentation;
use crate::state::AppState;

/// Routes mounted at `/presentations`.
///
/// ```text
/// GET    /       -> list (public)
/// POST   /       -> create (admin, multipart)
/// GET    /{id}   -> detail (public)
/// PUT    /{id}   -> edit (admin, multipart)
/// DELETE /{id}   -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(presentation::list).post(presentation::create))
        .route(
            "/{id}",
            get(presentation::get_by_id)
                .put(presentation::update)
                .delete(presentation::delete),
        )
}
