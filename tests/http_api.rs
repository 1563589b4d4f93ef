//! HTTP surface: health, authentication, role checks and validation errors.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::{build_app, call, token_for, ELF1, ELF2, SANTA};

#[tokio::test]
async fn health_is_public() {
    let app = build_app();
    let (status, body) = call(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn api_requires_bearer_token() {
    let app = build_app();
    let (status, body) = call(&app, Method::GET, "/api/tasks", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn unknown_bearer_token_is_refused() {
    let app = build_app();
    let request = Request::builder()
        .uri("/api/tasks")
        .header("Authorization", "Bearer forged")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = build_app();
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ════════════════════════════════════════════════════════════════════════════
// Realtime handshake
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn websocket_handshake_rejects_bad_token_before_upgrade() {
    let app = build_app();
    let (status, _) = call(&app, Method::GET, "/ws?token=forged", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(&app, Method::GET, "/ws", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.registry.total_client_count().await, 0);
}

#[tokio::test]
async fn websocket_route_requires_upgrade_with_valid_token() {
    let app = build_app();
    let uri = format!("/ws?token={}", token_for(ELF1));
    let (status, body) = call(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::UPGRADE_REQUIRED);
    assert_eq!(body["code"], "UPGRADE_REQUIRED");
    assert_eq!(app.registry.total_client_count().await, 0);
}

// ════════════════════════════════════════════════════════════════════════════
// Roles and validation
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn field_agent_cannot_create_or_list_all_tasks() {
    let app = build_app();
    let (status, _) = call(
        &app,
        Method::POST,
        "/api/tasks",
        Some(ELF1),
        Some(json!({ "title": "Sneaky" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(&app, Method::GET, "/api/tasks", Some(ELF1), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn blank_title_is_a_validation_error() {
    let app = build_app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/tasks",
        Some(SANTA),
        Some(json!({ "title": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(body["details"]["field"], "title");
}

#[tokio::test]
async fn malformed_task_id_is_bad_request() {
    let app = build_app();
    let (status, _) = call(
        &app,
        Method::PATCH,
        "/api/tasks/not-a-uuid",
        Some(SANTA),
        Some(json!({ "title": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn agent_sees_only_own_tasks() {
    let app = build_app();
    for (title, assignee) in [("Mine", Some(ELF1)), ("Theirs", Some("elf02")), ("Nobody", None)] {
        let (status, _) = call(
            &app,
            Method::POST,
            "/api/tasks",
            Some(SANTA),
            Some(json!({ "title": title, "assigneeUserId": assignee })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, mine) = call(&app, Method::GET, "/api/tasks/my", Some(ELF1), None).await;
    assert_eq!(status, StatusCode::OK);
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["title"], "Mine");

    let (_, all) = call(&app, Method::GET, "/api/tasks", Some(SANTA), None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn overseer_lists_field_agents_by_username() {
    let app = build_app();
    let (status, agents) = call(&app, Method::GET, "/api/tasks/agents", Some(SANTA), None).await;
    assert_eq!(status, StatusCode::OK);
    let agents = agents.as_array().unwrap();
    assert_eq!(agents.len(), 8);
    assert_eq!(agents[0]["username"], "elf01");
    assert!(agents.iter().all(|a| a["role"] == "FIELD_AGENT"));
}

#[tokio::test]
async fn chat_resolves_the_overseer_and_rejects_unknown_peers() {
    let app = build_app();
    let (status, overseer) = call(&app, Method::GET, "/api/chat/overseer", Some(ELF1), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overseer, json!({ "_id": SANTA, "username": SANTA }));

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/chat/dm/ghost",
        Some(ELF1),
        Some(json!({ "message": "hello?" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/chat/dm/santa",
        Some(ELF1),
        Some(json!({ "message": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ════════════════════════════════════════════════════════════════════════════
// Admin
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn admin_routes_are_overseer_only() {
    let app = build_app();
    for uri in [
        "/api/admin/analytics",
        "/api/admin/agents",
        "/api/admin/agents/elf01/tasks",
    ] {
        let (status, body) = call(&app, Method::GET, uri, Some(ELF1), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
        assert_eq!(body["code"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn analytics_counts_tasks_and_ranks_agents() {
    let app = build_app();
    for (title, assignee) in [("Sleigh", Some(ELF2)), ("Reindeer", Some(ELF2)), ("List", Some(ELF1))] {
        let (status, _) = call(
            &app,
            Method::POST,
            "/api/tasks",
            Some(SANTA),
            Some(json!({ "title": title, "assigneeUserId": assignee })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = call(&app, Method::GET, "/api/admin/analytics", Some(SANTA), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["tasks"],
        json!({ "total": 3, "open": 3, "inProgress": 0, "completed": 0 })
    );
    let agents = body["agents"].as_array().unwrap();
    assert_eq!(agents.len(), 8);
    assert_eq!(agents[0], json!({ "userId": ELF2, "username": ELF2, "openCount": 2 }));
    assert_eq!(agents[1]["userId"], ELF1);
    assert_eq!(agents[2]["openCount"], 0);
    assert_eq!(body["notifications"]["unread"], 3);
}

#[tokio::test]
async fn admin_lists_agent_accounts_with_registration_time() {
    let app = build_app();
    let (status, body) = call(&app, Method::GET, "/api/admin/agents", Some(SANTA), None).await;
    assert_eq!(status, StatusCode::OK);
    let accounts = body.as_array().unwrap();
    assert_eq!(accounts.len(), 8);
    assert_eq!(accounts[0]["_id"], ELF1);
    assert!(accounts.iter().all(|a| a["createdAt"].is_string()));
}

#[tokio::test]
async fn admin_lists_one_agents_tasks() {
    let app = build_app();
    for (title, assignee) in [("Mine", ELF1), ("Theirs", ELF2)] {
        call(
            &app,
            Method::POST,
            "/api/tasks",
            Some(SANTA),
            Some(json!({ "title": title, "assigneeUserId": assignee })),
        )
        .await;
    }

    let (status, body) = call(
        &app,
        Method::GET,
        "/api/admin/agents/elf01/tasks",
        Some(SANTA),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let tasks = body.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Mine");

    for unknown in ["ghost", SANTA] {
        let uri = format!("/api/admin/agents/{}/tasks", unknown);
        let (status, body) = call(&app, Method::GET, &uri, Some(SANTA), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
