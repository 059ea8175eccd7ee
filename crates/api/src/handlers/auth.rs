//! Handlers for the `/auth` resource (login, logout).

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{Duration, Utc};
use podium_core::error::CoreError;
use podium_db::models::session::CreateSession;
use podium_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password;
use crate::auth::session::{generate_session_token, hash_session_token};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::bearer_token;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Opaque bearer token identifying the session.
    pub token: String,
    /// Session lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`LoginResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub username: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Issues an opaque session token;
/// only its digest is stored server-side.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // 1. Find user by username. An unknown name gets the same answer as a
    //    wrong password.
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    // 2. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    // 3. Drop dead sessions while we are here.
    SessionRepo::purge_expired(&state.pool, Utc::now()).await?;

    // 4. Issue a fresh session.
    let (token, token_hash) = generate_session_token();
    let expires_at = Utc::now() + Duration::hours(state.config.session_ttl_hours);
    let session_input = CreateSession {
        token_hash,
        username: user.username.clone(),
        expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    tracing::info!(username = %user.username, "User logged in");

    Ok(Json(LoginResponse {
        token,
        expires_in: state.config.session_ttl_hours * 3600,
        user: UserInfo {
            username: user.username,
            role: user.user_role,
        },
    }))
}

/// POST /api/v1/auth/logout
///
/// Revoke the presented session. Returns 204 No Content; an unknown or
/// already-expired token is a 401 like any other unauthenticated request.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<StatusCode> {
    let token = bearer_token(&headers).ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Missing or malformed Authorization header. Expected: Bearer <token>".into(),
        ))
    })?;

    let revoked = SessionRepo::delete_by_token_hash(&state.pool, &hash_session_token(token)).await?;
    if !revoked {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid or expired session".into(),
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
