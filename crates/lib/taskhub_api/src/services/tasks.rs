//! Task service — owner-scoped CRUD delegating to `taskhub_core::tasks`.

use sqlx::PgPool;
use uuid::Uuid;

use taskhub_core::models::tasks::{NewTask, TaskUpdate};
use taskhub_core::{objectives, tasks::queries};

use crate::error::{AppError, AppResult};
use crate::models::{
    CreateTaskRequest, ObjectiveResponse, TaskResponse, ToggleTaskRequest, UpdateTaskRequest,
};

/// List all tasks owned by the caller.
pub async fn list_tasks(pool: &PgPool, user_id: Uuid) -> AppResult<Vec<TaskResponse>> {
    let rows = queries::list_tasks_for_user(pool, user_id).await?;
    Ok(rows.into_iter().map(TaskResponse::from).collect())
}

/// List the full departmental objective catalog.
pub async fn list_objectives(pool: &PgPool) -> AppResult<Vec<ObjectiveResponse>> {
    let rows = objectives::list_objectives(pool).await?;
    Ok(rows.into_iter().map(ObjectiveResponse::from).collect())
}

/// Create a task owned by the caller. `completed` starts false.
pub async fn create_task(
    pool: &PgPool,
    user_id: Uuid,
    body: CreateTaskRequest,
) -> AppResult<TaskResponse> {
    validate_title(&body.title)?;

    let row = queries::insert_task(
        pool,
        user_id,
        &NewTask {
            title: body.title,
            description: body.description,
            date: body.date,
            departmental_goal: body.departmental_goal,
        },
    )
    .await?;
    Ok(TaskResponse::from(row))
}

/// Full replace of a task's mutable fields.
pub async fn update_task(
    pool: &PgPool,
    user_id: Uuid,
    task_id: Uuid,
    body: UpdateTaskRequest,
) -> AppResult<TaskResponse> {
    validate_title(&body.title)?;

    let row = queries::update_task(
        pool,
        user_id,
        task_id,
        &TaskUpdate {
            title: body.title,
            description: body.description,
            date: body.date,
            completed: body.completed,
        },
    )
    .await?;
    Ok(TaskResponse::from(row))
}

/// Update only the completion flag.
pub async fn toggle_task(
    pool: &PgPool,
    user_id: Uuid,
    task_id: Uuid,
    body: ToggleTaskRequest,
) -> AppResult<TaskResponse> {
    let row = queries::set_task_completed(pool, user_id, task_id, body.completed).await?;
    Ok(TaskResponse::from(row))
}

/// Delete a task owned by the caller.
pub async fn delete_task(pool: &PgPool, user_id: Uuid, task_id: Uuid) -> AppResult<()> {
    queries::delete_task(pool, user_id, task_id).await?;
    Ok(())
}

fn validate_title(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Task title is required".into()));
    }
    Ok(())
}
