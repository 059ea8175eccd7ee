//! HTTP-level integration tests for login, logout, and role enforcement.

mod common;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Json;
use chrono::{Duration, Utc};
use common::{
    body_json, create_test_user, get_auth, login_as, login_user, post_auth, post_json,
    post_json_auth,
};
use podium_api::error::AppResult;
use podium_api::middleware::rbac::RequireEditor;
use podium_db::models::session::CreateSession;
use podium_db::repositories::SessionRepo;
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Login / logout
// ---------------------------------------------------------------------------

/// Successful login returns 200 with a session token and user info.
#[sqlx::test(migrator = "podium_db::MIGRATOR")]
async fn test_login_success(pool: SqlitePool) {
    let password = create_test_user(&pool, "alice", "admin").await;
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "alice", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["token"].is_string(), "response must contain token");
    assert!(json["expires_in"].is_number(), "response must contain expires_in");
    assert_eq!(json["user"]["username"], "alice");
    assert_eq!(json["user"]["role"], "admin");
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrator = "podium_db::MIGRATOR")]
async fn test_login_wrong_password(pool: SqlitePool) {
    create_test_user(&pool, "bob", "editor").await;
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "bob", "password": "incorrect_password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with a nonexistent username returns 401.
#[sqlx::test(migrator = "podium_db::MIGRATOR")]
async fn test_login_nonexistent_user(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes the presented session; the token stops working.
#[sqlx::test(migrator = "podium_db::MIGRATOR")]
async fn test_logout_revokes_session(pool: SqlitePool) {
    let password = create_test_user(&pool, "carol", "admin").await;
    let (app, _uploads) = common::build_test_app(pool);

    let token = login_user(app.clone(), "carol", &password).await;

    // Token works before logout.
    let response = get_auth(app.clone(), "/api/v1/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_auth(app.clone(), "/api/v1/auth/logout", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // And is dead afterwards.
    let response = get_auth(app.clone(), "/api/v1/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Logging out twice is a 401, not a crash.
    let response = post_auth(app, "/api/v1/auth/logout", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// An expired session is rejected like no session at all.
#[sqlx::test(migrator = "podium_db::MIGRATOR")]
async fn test_expired_session_is_unauthorized(pool: SqlitePool) {
    create_test_user(&pool, "dave", "admin").await;

    // Plant a session that expired an hour ago.
    let (token, token_hash) = podium_api::auth::session::generate_session_token();
    SessionRepo::create(
        &pool,
        &CreateSession {
            token_hash,
            username: "dave".to_string(),
            expires_at: Utc::now() - Duration::hours(1),
        },
    )
    .await
    .expect("session creation should succeed");

    let (app, _uploads) = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A garbage token is rejected.
#[sqlx::test(migrator = "podium_db::MIGRATOR")]
async fn test_garbage_token_is_unauthorized(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/users", "not-a-real-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Role enforcement
// ---------------------------------------------------------------------------

/// Admin endpoints require authentication -- missing token returns 401.
#[sqlx::test(migrator = "podium_db::MIGRATOR")]
async fn test_admin_endpoint_requires_auth(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/admin/users").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A non-admin user is forbidden from admin endpoints.
#[sqlx::test(migrator = "podium_db::MIGRATOR")]
async fn test_admin_endpoint_requires_admin_role(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool.clone());
    let token = login_as(app.clone(), &pool, "eve", "editor").await;

    let response = get_auth(app, "/api/v1/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// An editor-gated route admits exactly `editor` and `admin`; everyone else
/// is forbidden.
#[sqlx::test(migrator = "podium_db::MIGRATOR")]
async fn test_editor_gate_admits_editor_and_admin_only(pool: SqlitePool) {
    async fn editor_only(RequireEditor(user): RequireEditor) -> AppResult<Json<String>> {
        Ok(Json(user.username))
    }

    let (app, _uploads) = common::build_test_app(pool.clone());

    // A throwaway route gated by RequireEditor, sharing the app's state.
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(dir.path());
    let state = podium_api::state::AppState {
        pool: pool.clone(),
        store: std::sync::Arc::new(podium_db::store::SqlStore::new(pool.clone())),
        uploads: std::sync::Arc::new(podium_api::uploads::UploadStore::new(dir.path())),
        config: std::sync::Arc::new(config),
    };
    let gated = axum::Router::new()
        .route("/gated", get(editor_only))
        .with_state(state);

    let editor_token = login_as(app.clone(), &pool, "ed", "editor").await;
    let admin_token = login_as(app.clone(), &pool, "root", "admin").await;
    let viewer_token = login_as(app.clone(), &pool, "vi", "viewer").await;

    let response = get_auth(gated.clone(), "/gated", &editor_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(gated.clone(), "/gated", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK, "admin bypasses the editor gate");

    let response = get_auth(gated.clone(), "/gated", &viewer_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = common::get(gated, "/gated").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// User management
// ---------------------------------------------------------------------------

/// Admin can provision a user, and the new user can log in.
#[sqlx::test(migrator = "podium_db::MIGRATOR")]
async fn test_admin_creates_user_who_can_login(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool.clone());
    let admin_token = login_as(app.clone(), &pool, "root", "admin").await;

    let body = serde_json::json!({
        "username": "newbie",
        "password": "a-decent-password",
        "role": "editor",
    });
    let response = post_json_auth(app.clone(), "/api/v1/admin/users", body, &admin_token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["username"], "newbie");
    assert_eq!(json["user_role"], "editor");
    assert!(json.get("password_hash").is_none(), "hash must not leak");

    let token = login_user(app, "newbie", "a-decent-password").await;
    assert!(!token.is_empty());
}

/// Creating a user with a taken username returns 409.
#[sqlx::test(migrator = "podium_db::MIGRATOR")]
async fn test_duplicate_username_conflicts(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool.clone());
    let admin_token = login_as(app.clone(), &pool, "root", "admin").await;

    let body = serde_json::json!({
        "username": "root",
        "password": "whatever-else",
        "role": "editor",
    });
    let response = post_json_auth(app, "/api/v1/admin/users", body, &admin_token).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// A too-short password is rejected with a validation error.
#[sqlx::test(migrator = "podium_db::MIGRATOR")]
async fn test_weak_password_is_rejected(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool.clone());
    let admin_token = login_as(app.clone(), &pool, "root", "admin").await;

    let body = serde_json::json!({
        "username": "weakling",
        "password": "short",
        "role": "editor",
    });
    let response = post_json_auth(app, "/api/v1/admin/users", body, &admin_token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// User listing excludes password hashes.
#[sqlx::test(migrator = "podium_db::MIGRATOR")]
async fn test_list_users_excludes_hashes(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool.clone());
    let admin_token = login_as(app.clone(), &pool, "root", "admin").await;

    let response = get_auth(app, "/api/v1/admin/users", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let users = json.as_array().expect("array of users");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "root");
    assert!(users[0].get("password_hash").is_none());
}
