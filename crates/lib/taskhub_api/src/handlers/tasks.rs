//! Task request handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{CreateTaskRequest, TaskResponse, ToggleTaskRequest, UpdateTaskRequest};
use crate::services::tasks;

/// `GET /tasks` — list the authenticated user's tasks.
pub async fn list_tasks_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
) -> AppResult<Json<Vec<TaskResponse>>> {
    let resp = tasks::list_tasks(&state.pool, user.user_id()?).await?;
    Ok(Json(resp))
}

/// `POST /tasks` — create a task owned by the authenticated user.
pub async fn create_task_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Json(body): Json<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<TaskResponse>)> {
    let resp = tasks::create_task(&state.pool, user.user_id()?, body).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// `PUT /tasks/{id}` — full update of a task's mutable fields.
pub async fn update_task_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Path(task_id): Path<Uuid>,
    Json(body): Json<UpdateTaskRequest>,
) -> AppResult<Json<TaskResponse>> {
    let resp = tasks::update_task(&state.pool, user.user_id()?, task_id, body).await?;
    Ok(Json(resp))
}

/// `PUT /tasks/{id}/toggle` — update only the completion flag.
pub async fn toggle_task_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Path(task_id): Path<Uuid>,
    Json(body): Json<ToggleTaskRequest>,
) -> AppResult<Json<TaskResponse>> {
    let resp = tasks::toggle_task(&state.pool, user.user_id()?, task_id, body).await?;
    Ok(Json(resp))
}

/// `DELETE /tasks/{id}` — delete a task, responding with an empty body.
pub async fn delete_task_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Path(task_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    tasks::delete_task(&state.pool, user.user_id()?, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
