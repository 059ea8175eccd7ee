//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the full production router (same middleware stack as `main.rs`)
//! on top of a per-test database pool and a temporary upload directory.

#![allow(dead_code)] // not every test binary uses every helper

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use podium_api::auth::password::hash_password;
use podium_api::config::ServerConfig;
use podium_api::router::build_app_router;
use podium_api::state::AppState;
use podium_api::uploads::UploadStore;
use podium_db::models::user::CreateUser;
use podium_db::repositories::UserRepo;
use podium_db::store::SqlStore;

/// Build a test `ServerConfig` with safe defaults and the given upload dir.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        upload_dir: upload_dir.to_path_buf(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_ttl_hours: 12,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a fresh temporary upload directory.
///
/// The returned `TempDir` guard must be kept alive for the duration of the
/// test; dropping it deletes the upload directory.
pub fn build_test_app(pool: SqlitePool) -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir should be creatable");
    let config = test_config(dir.path());

    let state = AppState {
        pool: pool.clone(),
        store: Arc::new(SqlStore::new(pool)),
        uploads: Arc::new(UploadStore::new(dir.path())),
        config: Arc::new(config.clone()),
    };

    (build_app_router(state, &config), dir)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should succeed")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// Parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Read a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Multipart helpers
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "------------podium-test-boundary";

/// Build a `multipart/form-data` body from text fields and file parts.
///
/// Returns the content-type header value and the encoded body.
pub fn multipart_form(
    fields: &[(&str, &str)],
    files: &[(&str, &[u8])],
) -> (String, Vec<u8>) {
    let mut body: Vec<u8> = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    for (filename, data) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"attachments\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    fields: &[(&str, &str)],
    files: &[(&str, &[u8])],
    token: &str,
) -> Response<Body> {
    let (content_type, body) = multipart_form(fields, files);
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, content_type)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

pub async fn put_multipart_auth(
    app: Router,
    uri: &str,
    fields: &[(&str, &str)],
    files: &[(&str, &[u8])],
    token: &str,
) -> Response<Body> {
    let (content_type, body) = multipart_form(fields, files);
    send(
        app,
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(CONTENT_TYPE, content_type)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a test user directly in the database, returning the plaintext
/// password used.
pub async fn create_test_user(pool: &SqlitePool, username: &str, role: &str) -> String {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateUser {
        username: username.to_string(),
        password_hash: hashed,
        user_role: role.to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    password.to_string()
}

/// Log in a user via the API and return the session token.
pub async fn login_user(app: Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["token"].as_str().expect("token in response").to_string()
}

/// Create a user with the given role and log them in, returning the token.
pub async fn login_as(app: Router, pool: &SqlitePool, username: &str, role: &str) -> String {
    let password = create_test_user(pool, username, role).await;
    login_user(app, username, &password).await
}

/// Standard valid form fields for creating a presentation.
pub fn valid_presentation_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("title", "Intro to Rust"),
        ("presenters", "Jane Doe & John Smith"),
        ("scheduled", "2026-09-01"),
        ("time_range", "9-10am"),
        ("notes", "Bring laptops"),
    ]
}
