//! Shared harness for HTTP-level integration tests.
//!
//! Mirrors the router construction in `main.rs` via [`build_app_router`]
//! so tests exercise the same middleware stack (CORS, request ID,
//! timeout, tracing, panic recovery) that production uses.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use codeprogress_api::auth::jwt::{generate_opaque_token, hash_opaque_token, JwtConfig};
use codeprogress_api::auth::password::hash_password;
use codeprogress_api::config::ServerConfig;
use codeprogress_api::email::Mailer;
use codeprogress_api::router::build_app_router;
use codeprogress_api::state::AppState;
use codeprogress_db::models::user::{CreateUser, User};
use codeprogress_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_base_url: "http://localhost:3000".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router against the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer: Arc::new(Mailer::disabled()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// User fixtures
// ---------------------------------------------------------------------------

/// Create a confirmed user directly in the database and return the user
/// row plus the plaintext password used.
pub async fn create_confirmed_user(pool: &PgPool, email: &str, name: &str) -> (User, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let (token, token_hash) = generate_opaque_token();

    let input = CreateUser {
        email: email.to_string(),
        password_hash: hashed,
        full_name: Some(name.to_string()),
        confirmation_token_hash: token_hash,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");

    let user = UserRepo::confirm_by_token_hash(pool, &hash_opaque_token(&token))
        .await
        .expect("confirmation should succeed")
        .expect("token should match");

    (user, password.to_string())
}

/// Log in a user via the API and return the JSON response containing
/// `access_token`, `refresh_token`, and `user` info.
pub async fn login_user(app: Router, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await
}

/// Seed a confirmed user and log them in, returning their id and access
/// token. Most non-auth test files start here.
pub async fn signed_in_user(pool: &PgPool, email: &str, name: &str) -> (i64, String) {
    let (user, password) = create_confirmed_user(pool, email, name).await;
    let json = login_user(build_test_app(pool.clone()), email, &password).await;
    let token = json["access_token"]
        .as_str()
        .expect("login must return access_token")
        .to_string();
    (user.id, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("request should not fail")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "GET", uri, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, "POST", uri, Some(body), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, "POST", uri, Some(body), Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, "PUT", uri, Some(body), Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "DELETE", uri, None, Some(token)).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
