//! API routes for dayflowd.
//!
//! Status codes are part of the contract: 201 on create, 204 on delete,
//! 400 with field-level detail for rejected drafts, 404 for absent ids.
//! `/ai/chat` returns 400 only for a missing message - every other failure
//! on that path degrades inside the pipeline and still answers 200.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use dayflow_common::chat::ChatOutcome;
use dayflow_common::error::{DayflowError, FieldError};
use dayflow_common::model::{Goal, GoalDraft, Suggestion, SuggestionDraft, Task, TaskDraft};
use dayflow_common::validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::chat;
use crate::generator::{self, ScheduleOptimization};
use crate::server::AppState;

type AppStateArc = Arc<AppState>;

/// JSON error body for 4xx responses.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

type ErrorResponse = (StatusCode, Json<ApiError>);

fn error_response(err: DayflowError) -> ErrorResponse {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let errors = match &err {
        DayflowError::Validation { errors, .. } => errors.clone(),
        _ => vec![],
    };
    (
        status,
        Json(ApiError {
            message: err.to_string(),
            errors,
        }),
    )
}

fn bad_request(message: &str, errors: Vec<FieldError>) -> ErrorResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError {
            message: message.to_string(),
            errors,
        }),
    )
}

/// Deserialize a draft from a raw body. A type mismatch is an invalid
/// draft (400), not a transport-level 422.
fn parse_draft<T: serde::de::DeserializeOwned>(
    kind: &'static str,
    value: Value,
) -> Result<T, ErrorResponse> {
    serde_json::from_value(value).map_err(|e| {
        bad_request(
            &format!("invalid {kind} draft"),
            vec![FieldError::new("body", e.to_string())],
        )
    })
}

// ============================================================================
// Goal Routes
// ============================================================================

pub fn goal_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route(
            "/goals/:id",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
}

async fn list_goals(State(state): State<AppStateArc>) -> Json<Vec<Goal>> {
    Json(state.store.read().await.goals())
}

async fn get_goal(
    State(state): State<AppStateArc>,
    Path(id): Path<i64>,
) -> Result<Json<Goal>, ErrorResponse> {
    state
        .store
        .read()
        .await
        .goal(id)
        .map(Json)
        .ok_or_else(|| error_response(DayflowError::not_found("goal", id)))
}

async fn create_goal(
    State(state): State<AppStateArc>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Goal>), ErrorResponse> {
    let draft: GoalDraft = parse_draft("goal", body)?;
    let new_goal = validate::validate_goal(&draft)
        .map_err(|errors| error_response(DayflowError::validation("goal", errors)))?;

    let goal = state.store.write().await.create_goal(new_goal);
    Ok((StatusCode::CREATED, Json(goal)))
}

async fn update_goal(
    State(state): State<AppStateArc>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Goal>, ErrorResponse> {
    let draft: GoalDraft = parse_draft("goal", body)?;
    let patch = validate::validate_goal_patch(&draft)
        .map_err(|errors| error_response(DayflowError::validation("goal", errors)))?;

    state
        .store
        .write()
        .await
        .update_goal(id, patch)
        .map(Json)
        .ok_or_else(|| error_response(DayflowError::not_found("goal", id)))
}

async fn delete_goal(
    State(state): State<AppStateArc>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ErrorResponse> {
    if state.store.write().await.delete_goal(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(error_response(DayflowError::not_found("goal", id)))
    }
}

// ============================================================================
// Task Routes
// ============================================================================

#[derive(Debug, Deserialize)]
struct TaskQuery {
    /// Calendar day, `YYYY-MM-DD`; exact-day match on task start.
    date: Option<String>,
    #[serde(rename = "goalId")]
    goal_id: Option<i64>,
}

pub fn task_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/:id",
            get(get_task).put(update_task).delete(delete_task),
        )
}

async fn list_tasks(
    State(state): State<AppStateArc>,
    Query(query): Query<TaskQuery>,
) -> Result<Json<Vec<Task>>, ErrorResponse> {
    let day = match &query.date {
        Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            bad_request(
                "invalid query",
                vec![FieldError::new("date", "expected YYYY-MM-DD")],
            )
        })?),
        None => None,
    };

    let store = state.store.read().await;
    let tasks = match query.goal_id {
        Some(goal_id) => store.tasks_for_goal(goal_id),
        None => store.tasks(day),
    };
    Ok(Json(tasks))
}

async fn get_task(
    State(state): State<AppStateArc>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, ErrorResponse> {
    state
        .store
        .read()
        .await
        .task(id)
        .map(Json)
        .ok_or_else(|| error_response(DayflowError::not_found("task", id)))
}

async fn create_task(
    State(state): State<AppStateArc>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Task>), ErrorResponse> {
    let draft: TaskDraft = parse_draft("task", body)?;
    let new_task = validate::validate_task(&draft)
        .map_err(|errors| error_response(DayflowError::validation("task", errors)))?;

    let task = state.store.write().await.create_task(new_task);
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(state): State<AppStateArc>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Task>, ErrorResponse> {
    let draft: TaskDraft = parse_draft("task", body)?;
    let patch = validate::validate_task_patch(&draft)
        .map_err(|errors| error_response(DayflowError::validation("task", errors)))?;

    state
        .store
        .write()
        .await
        .update_task(id, patch)
        .map(Json)
        .ok_or_else(|| error_response(DayflowError::not_found("task", id)))
}

async fn delete_task(
    State(state): State<AppStateArc>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ErrorResponse> {
    if state.store.write().await.delete_task(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(error_response(DayflowError::not_found("task", id)))
    }
}

// ============================================================================
// Suggestion Routes
// ============================================================================

pub fn suggestion_routes() -> Router<AppStateArc> {
    Router::new()
        .route(
            "/ai-suggestions",
            get(list_suggestions).post(create_suggestion),
        )
        .route("/ai-suggestions/:id/read", post(mark_suggestion_read))
}

async fn list_suggestions(State(state): State<AppStateArc>) -> Json<Vec<Suggestion>> {
    Json(state.store.read().await.suggestions())
}

async fn create_suggestion(
    State(state): State<AppStateArc>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Suggestion>), ErrorResponse> {
    let draft: SuggestionDraft = parse_draft("suggestion", body)?;
    let new_suggestion = validate::validate_suggestion(&draft)
        .map_err(|errors| error_response(DayflowError::validation("suggestion", errors)))?;

    let suggestion = state.store.write().await.create_suggestion(new_suggestion);
    Ok((StatusCode::CREATED, Json(suggestion)))
}

async fn mark_suggestion_read(
    State(state): State<AppStateArc>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ErrorResponse> {
    if state.store.write().await.mark_suggestion_read(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(error_response(DayflowError::not_found("suggestion", id)))
    }
}

// ============================================================================
// AI Routes
// ============================================================================

pub fn ai_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/ai/chat", post(ai_chat))
        .route("/ai/generate-tasks/:goal_id", post(ai_generate_tasks))
        .route("/ai/optimize-schedule", post(ai_optimize_schedule))
}

/// The conversational endpoint. Missing message is the only 4xx; the
/// pipeline converts every upstream failure into a normal answer.
async fn ai_chat(
    State(state): State<AppStateArc>,
    Json(body): Json<Value>,
) -> Result<Json<ChatOutcome>, ErrorResponse> {
    let message = match body.get("message").and_then(|m| m.as_str()).map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => {
            return Err(bad_request(
                "Message is required",
                vec![FieldError::new("message", "is required")],
            ))
        }
    };

    info!("[Q]  Chat message: {}", message);
    Ok(Json(chat::handle_message(&state, &message).await))
}

/// Break an existing goal into scheduled task drafts. The drafts are
/// returned, not persisted - the caller decides what to keep.
async fn ai_generate_tasks(
    State(state): State<AppStateArc>,
    Path(goal_id): Path<i64>,
) -> Result<Json<Vec<TaskDraft>>, ErrorResponse> {
    let goal = state
        .store
        .read()
        .await
        .goal(goal_id)
        .ok_or_else(|| error_response(DayflowError::not_found("goal", goal_id)))?;

    let drafts = generator::generate_tasks_for_goal(&state.llm, &goal, Utc::now()).await;
    info!("Generated {} draft(s) for goal {}", drafts.len(), goal_id);
    Ok(Json(drafts))
}

/// Advisory schedule rework over the whole store. Upstream failure yields
/// an empty plan, still 200.
async fn ai_optimize_schedule(
    State(state): State<AppStateArc>,
) -> Json<ScheduleOptimization> {
    let (goals, tasks) = {
        let store = state.store.read().await;
        (store.goals(), store.tasks(None))
    };
    Json(generator::optimize_schedule(&state.llm, &goals, &tasks).await)
}

// ============================================================================
// Health Routes
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    version: String,
    uptime_seconds: u64,
    model: String,
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: dayflow_common::VERSION.to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: state.llm.model().to_string(),
    })
}
