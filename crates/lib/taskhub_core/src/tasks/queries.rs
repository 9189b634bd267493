//! Task-table database queries.
//!
//! Every mutating query is scoped to the owning user: a caller holding
//! another user's task id gets `NotFound`, never the row.

use sqlx::PgPool;
use sqlx::types::Uuid;

use super::TaskError;
use crate::models::tasks::{NewTask, TaskRow, TaskUpdate};
use crate::uuid::uuidv7;

/// List all tasks owned by a user, in storage order.
pub async fn list_tasks_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<TaskRow>, TaskError> {
    let rows = sqlx::query_as::<_, TaskRow>(
        r#"
        SELECT id, title, description, completed, date,
               departmental_goal, user_id, created_at
        FROM tasks
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert a new task for a user. `completed` starts false.
pub async fn insert_task(
    pool: &PgPool,
    user_id: Uuid,
    task: &NewTask,
) -> Result<TaskRow, TaskError> {
    let row = sqlx::query_as::<_, TaskRow>(
        r#"
        INSERT INTO tasks (id, title, description, date, departmental_goal, user_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, title, description, completed, date,
                  departmental_goal, user_id, created_at
        "#,
    )
    .bind(uuidv7())
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.date)
    .bind(task.departmental_goal)
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Replace all mutable fields of a task owned by the user.
pub async fn update_task(
    pool: &PgPool,
    user_id: Uuid,
    task_id: Uuid,
    update: &TaskUpdate,
) -> Result<TaskRow, TaskError> {
    let row = sqlx::query_as::<_, TaskRow>(
        r#"
        UPDATE tasks
        SET title = $3, description = $4, date = $5, completed = $6
        WHERE id = $1 AND user_id = $2
        RETURNING id, title, description, completed, date,
                  departmental_goal, user_id, created_at
        "#,
    )
    .bind(task_id)
    .bind(user_id)
    .bind(&update.title)
    .bind(&update.description)
    .bind(update.date)
    .bind(update.completed)
    .fetch_optional(pool)
    .await?;
    row.ok_or(TaskError::NotFound)
}

/// Update only the completion flag of a task owned by the user.
pub async fn set_task_completed(
    pool: &PgPool,
    user_id: Uuid,
    task_id: Uuid,
    completed: bool,
) -> Result<TaskRow, TaskError> {
    let row = sqlx::query_as::<_, TaskRow>(
        r#"
        UPDATE tasks
        SET completed = $3
        WHERE id = $1 AND user_id = $2
        RETURNING id, title, description, completed, date,
                  departmental_goal, user_id, created_at
        "#,
    )
    .bind(task_id)
    .bind(user_id)
    .bind(completed)
    .fetch_optional(pool)
    .await?;
    row.ok_or(TaskError::NotFound)
}

/// Delete a task owned by the user.
pub async fn delete_task(pool: &PgPool, user_id: Uuid, task_id: Uuid) -> Result<(), TaskError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(task_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(TaskError::NotFound);
    }
    Ok(())
}
