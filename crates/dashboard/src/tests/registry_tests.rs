// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::Duration;

use axum::Router;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::Json;
use serde_json::{Value, json};
use teamtune_api::{BlockUserResponse, BulkApproveRequest, BulkOperationResult, BulkRejectRequest};
use teamtune_domain::LifecycleAction;

use super::helpers::default_settings;
use crate::registry::user_path;
use crate::{DashboardError, HttpRegistry, RegistryConfig, UserRegistry};

/// Serves `router` on an ephemeral local port and returns its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A registry stand-in answering each route with a fixed response.
fn fixture_router() -> Router {
    Router::new()
        .route(
            "/users",
            get(|headers: HeaderMap| async move {
                let actor: Option<String> = headers
                    .get("x-actor-id")
                    .and_then(|v| v.to_str().ok())
                    .map(ToString::to_string);
                match actor {
                    Some(actor) if actor == "admin-1" => {
                        (StatusCode::OK, Json(json!({ "users": [] })))
                    }
                    _ => (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "error": true, "message": "unknown actor" })),
                    ),
                }
            }),
        )
        .route(
            "/users/bulk/approve",
            post(|| async {
                Json(json!({
                    "total_requested": 2,
                    "total_approved": 1,
                    "approved": ["A"],
                    "failed": [{ "user_id": "B", "error": "already active" }]
                }))
            }),
        )
        .route(
            "/users/bulk/reject",
            post(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "error": true, "message": "No users selected" })),
                )
            }),
        )
        .route(
            "/users/{user_id}/block",
            post(|Path(user_id): Path<String>| async move {
                Json(BlockUserResponse {
                    total_requested: 1,
                    total_blocked: 1,
                    blocked: vec![user_id],
                    failed: Vec::new(),
                })
            }),
        )
        .route(
            "/users/{user_id}",
            delete(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable") }),
        )
        .route("/roles", get(|| async { "not json" }))
        .route("/settings", get(|| async { Json(default_settings()) }))
        .route(
            "/departments",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        )
}

async fn fixture_registry() -> HttpRegistry {
    let base_url: String = serve(fixture_router()).await;
    HttpRegistry::new(&RegistryConfig::new(&base_url, "admin-1")).unwrap()
}

#[test]
fn test_config_defaults_to_thirty_second_timeout() {
    let config: RegistryConfig = RegistryConfig::new("http://localhost:3000", "admin-1");

    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(
        config.with_timeout(Duration::from_secs(5)).timeout,
        Duration::from_secs(5)
    );
}

#[test]
fn test_base_url_gets_scheme_and_loses_trailing_slash() {
    let registry: HttpRegistry =
        HttpRegistry::new(&RegistryConfig::new("localhost:3000/", "admin-1")).unwrap();

    assert_eq!(registry.base_url(), "http://localhost:3000");
}

#[test]
fn test_https_url_is_kept() {
    let registry: HttpRegistry =
        HttpRegistry::new(&RegistryConfig::new("https://teams.example.com", "admin-1")).unwrap();

    assert_eq!(
        registry.build_url("/users/bulk/approve"),
        "https://teams.example.com/users/bulk/approve"
    );
    assert_eq!(
        registry.build_url("roles"),
        "https://teams.example.com/roles"
    );
}

#[test]
fn test_empty_url_is_rejected() {
    let result = HttpRegistry::new(&RegistryConfig::new("  / ", "admin-1"));

    assert!(matches!(result, Err(DashboardError::Validation(_))));
}

#[test]
fn test_user_path_encodes_identifier_as_one_segment() {
    assert_eq!(user_path("usr-1", Some("block")), "/users/usr-1/block");
    assert_eq!(user_path("usr-1", None), "/users/usr-1");
    assert_eq!(
        user_path("team a/b?x", Some("unblock")),
        "/users/team%20a%2Fb%3Fx/unblock"
    );
}

#[tokio::test]
async fn test_bulk_approve_response_is_decoded_as_approve_result() {
    let registry: HttpRegistry = fixture_registry().await;
    let request: BulkApproveRequest = BulkApproveRequest {
        user_ids: vec![String::from("A"), String::from("B")],
        role: None,
        department_id: None,
    };

    let result: BulkOperationResult = registry.bulk_approve(&request).await.unwrap();

    assert_eq!(result.action, LifecycleAction::Approve);
    assert_eq!(result.total_requested, 2);
    assert_eq!(result.succeeded, ["A"]);
    assert_eq!(result.failed[0].user_id, "B");
    assert_eq!(result.failed[0].error, "already active");
}

#[tokio::test]
async fn test_error_body_message_is_surfaced_with_status() {
    let registry: HttpRegistry = fixture_registry().await;
    let request: BulkRejectRequest = BulkRejectRequest {
        user_ids: Vec::new(),
        reason: None,
    };

    let outcome = registry.bulk_reject(&request).await;

    match outcome {
        Err(DashboardError::Server { status, message }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "No users selected");
        }
        other => panic!("expected a server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_text_and_empty_error_bodies_fall_back() {
    let registry: HttpRegistry = fixture_registry().await;

    match registry.delete_user("usr-1").await {
        Err(DashboardError::Server { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected a server error, got {other:?}"),
    }

    match registry.list_departments().await {
        Err(DashboardError::Server { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("expected a server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_a_decode_error() {
    let registry: HttpRegistry = fixture_registry().await;

    let outcome = registry.list_roles().await;

    assert!(matches!(outcome, Err(DashboardError::Decode(_))));
}

#[tokio::test]
async fn test_single_user_id_reaches_server_intact() {
    let registry: HttpRegistry = fixture_registry().await;

    let result: BulkOperationResult = registry.block_user("team a/b").await.unwrap();

    assert_eq!(result.action, LifecycleAction::Block);
    assert_eq!(result.succeeded, ["team a/b"]);
}

#[tokio::test]
async fn test_requests_carry_the_configured_actor() {
    let base_url: String = serve(fixture_router()).await;
    let admin: HttpRegistry =
        HttpRegistry::new(&RegistryConfig::new(&base_url, "admin-1")).unwrap();
    let stranger: HttpRegistry =
        HttpRegistry::new(&RegistryConfig::new(&base_url, "someone-else")).unwrap();

    assert!(admin.list_users().await.unwrap().is_empty());
    assert!(matches!(
        stranger.list_users().await,
        Err(DashboardError::Server { status: 401, .. })
    ));
}

#[tokio::test]
async fn test_settings_are_decoded() {
    let registry: HttpRegistry = fixture_registry().await;

    let settings = registry.get_settings().await.unwrap();

    assert_eq!(settings, default_settings());
}
