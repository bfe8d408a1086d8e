//! API route handlers for the gateway.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use studydesk_core::{StudyDeskError, StudyEntry, Task};

use super::server::AppState;

/// Error reply, `{"error": "..."}` with a status matching the failure.
#[derive(Debug)]
pub struct ApiError(StudyDeskError);

impl From<StudyDeskError> for ApiError {
    fn from(e: StudyDeskError) -> Self {
        Self(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("⚠️ Rejected request body: {}", rejection.body_text());
        Self(StudyDeskError::InvalidBody(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            StudyDeskError::MissingField(_) | StudyDeskError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            StudyDeskError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = if self.0.is_client_error() {
            self.0.to_string()
        } else {
            tracing::error!("❌ Storage failure: {}", self.0);
            "Internal storage error".to_string()
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Unwrap a JSON body. A request sent without a JSON content type reads as `{}`.
fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(req)) => Ok(req),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(rejection.into()),
    }
}

/// Body of `POST /tasks`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    pub subject: Option<String>,
    pub color: Option<String>,
    pub completed: Option<bool>,
}

/// Body of `PUT /tasks/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub completed: Option<bool>,
}

/// Body of `POST /study-time`.
#[derive(Debug, Default, Deserialize)]
pub struct AddStudyTimeRequest {
    pub subject: Option<String>,
    #[serde(rename = "timeSpent")]
    pub time_spent: Option<Value>,
}

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "studydesk",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "storage": {
            "tasks": state.config.storage.tasks_path(),
            "study_time": state.config.storage.study_path(),
            "serialize_writes": state.config.storage.serialize_writes,
        },
    }))
}

// ---- Tasks ----

/// List all tasks.
pub async fn list_tasks(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Task>> {
    Ok(Json(state.tasks.list_tasks()?))
}

/// Create a task.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let req = body_or_default(body)?;
    let task = state
        .tasks
        .create_task(req.subject.as_deref(), req.color, req.completed)?;
    Ok(Json(serde_json::json!({
        "message": "✅ Task added successfully",
        "task": task,
    })))
}

/// Set a task's completion flag.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let req = body_or_default(body)?;
    let task = state.tasks.update_task(&id, req.completed)?;
    Ok(Json(serde_json::json!({
        "message": "✅ Task updated successfully",
        "task": task,
    })))
}

/// Delete a task.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    state.tasks.delete_task(&id)?;
    Ok(Json(serde_json::json!({"message": "🗑 Task deleted successfully"})))
}

// ---- Study time ----

/// List the study-time log.
pub async fn list_study_time(State(state): State<Arc<AppState>>) -> ApiResult<Vec<StudyEntry>> {
    Ok(Json(state.study.list_study_time()?))
}

/// Log a block of study time.
pub async fn add_study_time(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AddStudyTimeRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let req = body_or_default(body)?;
    state
        .study
        .add_study_time(req.subject.as_deref(), req.time_spent.as_ref())?;
    Ok(Json(serde_json::json!({"message": "✅ Study time saved successfully"})))
}
