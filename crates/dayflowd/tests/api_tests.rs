//! HTTP contract tests driven through the router without a socket.
//!
//! The generative backend is pointed at an unroutable port in every test:
//! CRUD must work without it, and `/ai/chat` must still answer 200.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use dayflowd::config::DaemonConfig;
use dayflowd::server::{self, AppState};
use std::sync::Arc;

fn test_app() -> Router {
    let mut config = DaemonConfig::defaults();
    config.llm.base_url = "http://127.0.0.1:9".to_string();
    config.llm.timeout_secs = 1;
    server::router(Arc::new(AppState::new(&config)))
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn goal_create_then_list() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/goals",
            Some(json!({"title": "Complete Product Launch", "priority": "high"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let goal = body_json(response).await;
    assert_eq!(goal["id"], 1);
    assert_eq!(goal["progress"], 0);
    assert_eq!(goal["isCompleted"], false);

    let response = app.oneshot(request("GET", "/goals", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let goals = body_json(response).await;
    assert_eq!(goals.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_goal_draft_gets_field_detail() {
    let app = test_app();

    let response = app
        .oneshot(request(
            "POST",
            "/goals",
            Some(json!({"title": "Ship", "progress": 150, "priority": "urgent"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"progress"));
    assert!(fields.contains(&"priority"));
}

#[tokio::test]
async fn task_crud_status_codes() {
    let app = test_app();

    // Create: 201, end derived from duration.
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/tasks",
            Some(json!({
                "title": "Deep Work Block",
                "startTime": "2025-04-07T13:00:00Z",
                "duration": 150,
                "priority": "high"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let task = body_json(response).await;
    assert_eq!(task["endTime"], "2025-04-07T15:30:00Z");
    assert_eq!(task["color"], "#6366F1");

    // Update: 200 merges only supplied fields.
    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            "/tasks/1",
            Some(json!({"isCompleted": true})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["isCompleted"], true);
    assert_eq!(updated["title"], "Deep Work Block");

    // Update absent id: 404. Invalid patch: 400.
    let response = app
        .clone()
        .oneshot(request("PUT", "/tasks/99", Some(json!({"title": "x"}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(request("PUT", "/tasks/1", Some(json!({"duration": 0}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Delete: 204 then 404.
    let response = app
        .clone()
        .oneshot(request("DELETE", "/tasks/1", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(request("DELETE", "/tasks/1", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn type_mismatch_in_draft_is_400_not_422() {
    let app = test_app();

    let response = app
        .oneshot(request(
            "POST",
            "/tasks",
            Some(json!({
                "title": "bad",
                "startTime": "2025-04-07T10:00:00Z",
                "duration": "ninety"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn task_day_filter_via_query() {
    let app = test_app();

    for (title, start) in [
        ("on the day", "2025-04-07T10:00:00Z"),
        ("other day", "2025-04-08T10:00:00Z"),
    ] {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/tasks",
                Some(json!({"title": title, "startTime": start, "duration": 30})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Query the date matching the first task's local calendar day.
    let day = chrono::DateTime::parse_from_rfc3339("2025-04-07T10:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Local)
        .date_naive();
    let response = app
        .clone()
        .oneshot(request("GET", &format!("/tasks?date={day}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let tasks = body_json(response).await;
    let titles: Vec<&str> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["on the day"]);

    let response = app
        .oneshot(request("GET", "/tasks?date=not-a-date", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn suggestion_read_cycle() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/ai-suggestions",
            Some(json!({
                "content": "Schedule demo prep for tomorrow 2-4 PM.",
                "type": "scheduling"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(request("POST", "/ai-suggestions/1/read", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(request("GET", "/ai-suggestions", None))
        .await
        .unwrap();
    let suggestions = body_json(response).await;
    assert_eq!(suggestions[0]["isRead"], true);

    let response = app
        .oneshot(request("POST", "/ai-suggestions/99/read", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chat_requires_a_message() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(request("POST", "/ai/chat", Some(json!({}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(request("POST", "/ai/chat", Some(json!({"message": "   "}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chat_answers_200_with_backend_down() {
    let app = test_app();

    let response = app
        .oneshot(request(
            "POST",
            "/ai/chat",
            Some(json!({"message": "hello"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["action"], "question");
    assert!(!body["response"].as_str().unwrap().is_empty());
    assert!(body.get("tasksCreated").is_none());
}

#[tokio::test]
async fn generate_tasks_for_unknown_goal_is_404() {
    let app = test_app();

    let response = app
        .oneshot(request("POST", "/ai/generate-tasks/42", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_version() {
    let app = test_app();

    let response = app.oneshot(request("GET", "/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].as_str().is_some());
}
