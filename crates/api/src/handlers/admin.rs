//! Handlers for the `/admin` resource (user management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use podium_core::error::CoreError;
use podium_db::models::user::{CreateUser, UserResponse};
use podium_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Minimum password length enforced on user creation.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// POST /api/v1/admin/users
///
/// Provision a new user: validates password strength, hashes it, and
/// returns a safe [`UserResponse`] with 201 Created. A taken username is a
/// 409 conflict.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        password_hash: hashed,
        user_role: input.role,
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(username = %user.username, role = %user.user_role, "Created user");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/v1/admin/users
///
/// List all users (password hashes excluded).
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    let responses = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(responses))
}
