pub mod admin;
pub mod attachment;
pub mod auth;
pub mod health;
pub mod presentation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                    login (public)
/// /auth/logout                   logout (requires auth)
///
/// /presentations                 list (public), create (admin)
/// /presentations/{id}            detail (public), edit + delete (admin)
///
/// /attachments/{id}              download (requires auth), delete (admin)
///
/// /admin/users                   list, create (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/presentations", presentation::router())
        .nest("/attachments", attachment::router())
        .nest("/admin", admin::router())
}
