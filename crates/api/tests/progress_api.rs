//! HTTP-level integration tests for the progress-log endpoints: the
//! per-project timeline, owner-only posting, and author-only mutations.
//! Ends with the cross-identity scenario: a second user reads a project's
//! logs freely but every direct mutation attempt is rejected.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete_auth, get, post_json_auth, put_json_auth, signed_in_user,
};
use sqlx::PgPool;

async fn create_project(pool: &PgPool, token: &str, title: &str) -> i64 {
    let body = serde_json::json!({ "title": title });
    let response = post_json_auth(build_test_app(pool.clone()), "/api/v1/projects", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn create_log(pool: &PgPool, token: &str, project_id: i64, content: &str) -> i64 {
    let body = serde_json::json!({ "content": content });
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/logs"),
        body,
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// A fresh project has an empty timeline -- a 200, not an error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_timeline(pool: PgPool) {
    let (_user_id, token) = signed_in_user(&pool, "owner@test.com", "Owner").await;
    let project_id = create_project(&pool, &token, "Tracker").await;

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/projects/{project_id}/logs"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], serde_json::json!([]));
}

/// The timeline for an unknown project is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_timeline_unknown_project(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/projects/9999/logs").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// New logs appear at the head of the timeline with the author's name.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logs_are_newest_first(pool: PgPool) {
    let (_user_id, token) = signed_in_user(&pool, "owner@test.com", "Owner").await;
    let project_id = create_project(&pool, &token, "Tracker").await;

    create_log(&pool, &token, project_id, "day 1").await;
    create_log(&pool, &token, project_id, "day 2").await;

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/projects/{project_id}/logs"),
    )
    .await;
    let json = body_json(response).await;
    let list = json["data"].as_array().expect("data should be an array");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["content"], "day 2");
    assert_eq!(list[1]["content"], "day 1");
    assert_eq!(list[0]["author_name"], "Owner");
}

// ---------------------------------------------------------------------------
// Posting rules
// ---------------------------------------------------------------------------

/// Only the project owner may post; another signed-in user is refused.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_only_owner_may_post(pool: PgPool) {
    let (_owner_id, owner_token) = signed_in_user(&pool, "owner@test.com", "Owner").await;
    let (_other_id, other_token) = signed_in_user(&pool, "other@test.com", "Other").await;
    let project_id = create_project(&pool, &owner_token, "Tracker").await;

    let body = serde_json::json!({ "content": "intruding" });
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/logs"),
        body,
        &other_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/projects/{project_id}/logs"),
    )
    .await;
    let json = body_json(response).await;
    assert!(
        json["data"].as_array().expect("data should be an array").is_empty(),
        "a refused post must not insert"
    );
}

/// Empty (after trimming) content is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_content_rejected(pool: PgPool) {
    let (_user_id, token) = signed_in_user(&pool, "owner@test.com", "Owner").await;
    let project_id = create_project(&pool, &token, "Tracker").await;

    let body = serde_json::json!({ "content": "  \n " });
    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/v1/projects/{project_id}/logs"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Author-only mutations
// ---------------------------------------------------------------------------

/// The author can edit and delete their own log.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_author_edit_and_delete(pool: PgPool) {
    let (_user_id, token) = signed_in_user(&pool, "owner@test.com", "Owner").await;
    let project_id = create_project(&pool, &token, "Tracker").await;
    let log_id = create_log(&pool, &token, project_id, "original").await;

    let body = serde_json::json!({ "content": "revised" });
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/logs/{log_id}"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "revised");

    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/logs/{log_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/projects/{project_id}/logs"),
    )
    .await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().expect("data should be an array").is_empty());
}

/// The cross-identity scenario: V sees U's logs but cannot mutate them.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_viewer_reads_but_cannot_mutate(pool: PgPool) {
    let (u_id, u_token) = signed_in_user(&pool, "u@test.com", "U").await;
    let (_v_id, v_token) = signed_in_user(&pool, "v@test.com", "V").await;

    let project_id = create_project(&pool, &u_token, "Tracker").await;
    let log_id = create_log(&pool, &u_token, project_id, "day 1").await;

    // V reads the timeline freely.
    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/logs"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let list = json["data"].as_array().expect("data should be an array");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["user_id"], u_id, "the log belongs to U");

    // Every direct mutation attempt by V is rejected.
    let body = serde_json::json!({ "content": "tampered" });
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/logs/{log_id}"),
        body,
        &v_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/logs/{log_id}"),
        &v_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The log is untouched.
    let response = get(
        build_test_app(pool),
        &format!("/api/v1/projects/{project_id}/logs"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["content"], "day 1");
}
