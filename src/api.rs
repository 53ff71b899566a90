//! The HTTP surface of the tracker
//!
//! Thin JSON handlers over [`TaskRepository`]: every route loads, mutates and
//! answers; all the actual task logic lives in the other modules.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::Error;
use crate::overdue::{CannedRemarks, OverdueTask, RemarkPicker};
use crate::repository::TaskRepository;
use crate::stats::Stats;
use crate::task::{Task, TaskPatch};

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    repository: Arc<TaskRepository>,
    picker: Arc<dyn RemarkPicker + Send + Sync>,
}

impl ApiState {
    /// State with the stock random remark picker
    pub fn new(repository: Arc<TaskRepository>) -> Self {
        Self {
            repository,
            picker: Arc::new(CannedRemarks),
        }
    }

    /// Replace the remark picker, e.g. by a deterministic one in tests
    pub fn with_picker(mut self, picker: Arc<dyn RemarkPicker + Send + Sync>) -> Self {
        self.picker = picker;
        self
    }
}

/// Request body for task creation
#[derive(Debug, Deserialize)]
struct CreateTask {
    name: String,
    category: String,
}

type Rejection = (StatusCode, Json<Value>);

/// Map a library error onto the HTTP status policy:
/// validation problems are the caller's fault, store problems are ours.
fn reject(err: Error) -> Rejection {
    let status = match &err {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::StoreIo(_) | Error::StoreCorrupt(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        log::warn!("Request failed: {}", err);
    }
    (status, Json(json!({"error": err.to_string()})))
}

fn reject_body(err: JsonRejection) -> Rejection {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": format!("invalid request: {err}")})),
    )
}

fn parse_date(raw: &str) -> Result<NaiveDate, Rejection> {
    raw.parse().map_err(|_| {
        reject(Error::Validation(format!(
            "'{raw}' is not a YYYY-MM-DD date"
        )))
    })
}

fn parse_id(raw: &str) -> Result<u64, Rejection> {
    raw.parse()
        .map_err(|_| reject(Error::Validation(format!("'{raw}' is not a task id"))))
}

/// `GET /api/health` - liveness probe.
async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// `GET /api/tasks/{date}` - every task of that day.
async fn list_tasks(
    State(state): State<ApiState>,
    Path(date): Path<String>,
) -> Result<Json<Vec<Task>>, Rejection> {
    let date = parse_date(&date)?;
    Ok(Json(state.repository.list_tasks(date).await))
}

/// `POST /api/tasks/{date}` - create a task, echo it back.
async fn add_task(
    State(state): State<ApiState>,
    Path(date): Path<String>,
    body: Result<Json<CreateTask>, JsonRejection>,
) -> Result<Json<Task>, Rejection> {
    let date = parse_date(&date)?;
    let Json(request) = body.map_err(reject_body)?;

    let task = state
        .repository
        .add_task(date, &request.name, &request.category)
        .await
        .map_err(reject)?;
    Ok(Json(task))
}

/// `PUT /api/tasks/{date}/{id}` - merge fields over an existing task.
/// An unknown date or id is acknowledged without complaint.
async fn update_task(
    State(state): State<ApiState>,
    Path((date, id)): Path<(String, String)>,
    body: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<Value>, Rejection> {
    let date = parse_date(&date)?;
    let id = parse_id(&id)?;
    let Json(patch) = body.map_err(reject_body)?;

    state
        .repository
        .update_task(date, id, &patch)
        .await
        .map_err(reject)?;
    Ok(Json(json!({"success": true})))
}

/// `DELETE /api/tasks/{date}/{id}` - drop a task.
/// An unknown date or id is acknowledged without complaint.
async fn delete_task(
    State(state): State<ApiState>,
    Path((date, id)): Path<(String, String)>,
) -> Result<Json<Value>, Rejection> {
    let date = parse_date(&date)?;
    let id = parse_id(&id)?;

    state
        .repository
        .delete_task(date, id)
        .await
        .map_err(reject)?;
    Ok(Json(json!({"success": true})))
}

/// `GET /api/incomplete-tasks` - overdue tasks, each with its remark.
async fn incomplete_tasks(
    State(state): State<ApiState>,
) -> Result<Json<Vec<OverdueTask>>, Rejection> {
    let today = Local::now().date_naive();
    Ok(Json(
        state
            .repository
            .overdue_tasks(today, state.picker.as_ref())
            .await,
    ))
}

/// `GET /api/stats` - today's completion plus the last week.
async fn stats(State(state): State<ApiState>) -> Result<Json<Stats>, Rejection> {
    let today = Local::now().date_naive();
    Ok(Json(state.repository.stats(today).await))
}

/// Build the axum router with shared state
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/tasks/{date}", get(list_tasks).post(add_task))
        .route(
            "/api/tasks/{date}/{id}",
            put(update_task).delete(delete_task),
        )
        .route("/api/incomplete-tasks", get(incomplete_tasks))
        .route("/api/stats", get(stats))
        .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024)) // 1 MiB max request body
        .with_state(state)
}
