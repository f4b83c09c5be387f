//! The HTTP surface, exercised in-process with `oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use integration_tests::memory_app;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn create_board(app: &Router, title: &str) -> Value {
    let response = send(
        app,
        "POST",
        "/api/boards",
        Some(json!({ "title": title, "createdBy": "alice" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn test_list_boards_empty() {
    let app = memory_app();

    let response = send(&app, "GET", "/api/boards", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_create_board_ignores_supplied_columns() {
    let app = memory_app();

    let response = send(
        &app,
        "POST",
        "/api/boards",
        Some(json!({
            "title": "Sprint 1",
            "description": "end of sprint",
            "createdBy": "alice",
            "columns": [{ "title": "Mine", "cards": [] }]
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let board = body_json(response).await;
    assert_eq!(board["title"], "Sprint 1");
    assert_eq!(board["description"], "end of sprint");
    assert_eq!(board["isActive"], true);
    assert_eq!(board["columns"].as_array().unwrap().len(), 3);
    assert_eq!(board["columns"][0]["title"], "What went well");
    assert!(board["id"].is_string());
}

#[tokio::test]
async fn test_create_board_without_title_is_400() {
    let app = memory_app();

    let response = send(&app, "POST", "/api/boards", Some(json!({ "createdBy": "alice" }))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "title is required");
}

#[tokio::test]
async fn test_get_board_round_trip_and_missing() {
    let app = memory_app();
    let board = create_board(&app, "Sprint 1").await;
    let id = board["id"].as_str().unwrap();

    let response = send(&app, "GET", &format!("/api/boards/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let loaded = body_json(response).await;
    assert_eq!(loaded["title"], "Sprint 1");
    assert_eq!(loaded["createdBy"], "alice");
    assert!(loaded.get("description").is_none());

    let response = send(&app, "GET", "/api/boards/not-a-real-id", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_json(response).await["message"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_add_card_and_vote_flow() {
    let app = memory_app();
    let board = create_board(&app, "Sprint 1").await;
    let id = board["id"].as_str().unwrap();

    let response = send(
        &app,
        "POST",
        &format!("/api/boards/{id}/columns/1/cards"),
        Some(json!({ "text": "slow reviews", "author": "bob" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let updated = body_json(response).await;
    assert_eq!(updated["columns"][1]["cards"][0]["text"], "slow reviews");
    assert_eq!(updated["columns"][1]["cards"][0]["votes"], 0);

    for expected in [1, 2] {
        let response = send(&app, "PUT", &format!("/api/boards/{id}/columns/1/cards/0/vote"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["columns"][1]["cards"][0]["votes"], expected);
    }
}

#[tokio::test]
async fn test_bad_indices_are_400() {
    let app = memory_app();
    let board = create_board(&app, "Sprint 1").await;
    let id = board["id"].as_str().unwrap();

    let response = send(
        &app,
        "POST",
        &format!("/api/boards/{id}/columns/3/cards"),
        Some(json!({ "text": "x", "author": "bob" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid column index");

    let response = send(&app, "PUT", &format!("/api/boards/{id}/columns/0/cards/0/vote"), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid column or card index");

    let response = send(&app, "GET", &format!("/api/boards/{id}"), None).await;
    let unchanged = body_json(response).await;
    assert!(unchanged["columns"]
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c["cards"].as_array().unwrap().is_empty()));
}

#[tokio::test]
async fn test_add_card_to_missing_board_is_404() {
    let app = memory_app();

    let response = send(
        &app,
        "POST",
        "/api/boards/0191d3a0-0000-7000-8000-000000000000/columns/0/cards",
        Some(json!({ "text": "x", "author": "bob" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_index_checks_board_first() {
    let app = memory_app();
    let missing = "0191d3a0-0000-7000-8000-000000000000";

    let response = send(
        &app,
        "POST",
        &format!("/api/boards/{missing}/columns/abc/cards"),
        Some(json!({ "text": "x", "author": "bob" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "PUT", &format!("/api/boards/{missing}/columns/abc/cards/0/vote"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let board = create_board(&app, "Sprint 1").await;
    let id = board["id"].as_str().unwrap();

    let response = send(
        &app,
        "POST",
        &format!("/api/boards/{id}/columns/abc/cards"),
        Some(json!({ "text": "x", "author": "bob" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid column index");

    let response = send(&app, "PUT", &format!("/api/boards/{id}/columns/1/cards/abc/vote"), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid column or card index");
}

#[tokio::test]
async fn test_delete_board() {
    let app = memory_app();
    let board = create_board(&app, "Sprint 1").await;
    let id = board["id"].as_str().unwrap();

    let response = send(&app, "DELETE", &format!("/api/boards/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Board deleted successfully");

    let response = send(&app, "DELETE", &format!("/api/boards/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "GET", "/api/boards", None).await;
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = memory_app();

    let response = send(&app, "GET", "/api/boards", None).await;

    assert!(response.headers().contains_key("x-request-id"));
}
