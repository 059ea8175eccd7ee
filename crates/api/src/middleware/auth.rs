//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use chrono::Utc;
use podium_core::error::CoreError;
use podium_db::repositories::{SessionRepo, UserRepo};

use crate::auth::session::hash_session_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a Bearer session token in the
/// `Authorization` header.
///
/// The token's digest is looked up in the `session` table; the role is then
/// resolved from the current `user` row (the user-loader), so a role change
/// takes effect on the next request, not at next login.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(username = %user.username, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    /// The user's role name (e.g. `"admin"`, `"editor"`).
    pub role: String,
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing or malformed Authorization header. Expected: Bearer <token>".into(),
            ))
        })?;

        let session = SessionRepo::find_active_by_token_hash(
            &state.pool,
            &hash_session_token(token),
            Utc::now(),
        )
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        let user = UserRepo::find_by_username(&state.pool, &session.username)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Session user no longer exists".into(),
                ))
            })?;

        Ok(AuthUser {
            username: user.username,
            role: user.user_role,
        })
    }
}
