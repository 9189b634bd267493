//! API request/response DTOs.
//!
//! Wire shapes are camelCase JSON; internal domain models live in
//! `taskhub_core::models`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskhub_core::models::tasks::{ObjectiveRow, TaskRow};

/// Error body returned for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Plain confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Bearer token issued on login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub username: String,
    pub current_password: String,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    pub date: chrono::NaiveDate,
    pub departmental_goal: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: String,
    pub description: String,
    pub date: chrono::NaiveDate,
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToggleTaskRequest {
    pub completed: bool,
}

/// A task as returned over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub date: chrono::NaiveDate,
    pub departmental_goal: Option<Uuid>,
    /// Owning user id.
    pub user: Uuid,
}

impl From<TaskRow> for TaskResponse {
    fn from(row: TaskRow) -> Self {
        TaskResponse {
            id: row.id,
            title: row.title,
            description: row.description,
            completed: row.completed,
            date: row.date,
            departmental_goal: row.departmental_goal,
            user: row.user_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Departmental objectives
// ---------------------------------------------------------------------------

/// A departmental objective as returned over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

impl From<ObjectiveRow> for ObjectiveResponse {
    fn from(row: ObjectiveRow) -> Self {
        ObjectiveResponse {
            id: row.id,
            title: row.title,
            description: row.description,
        }
    }
}
