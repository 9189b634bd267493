//! Client-side wire models, mirroring the server's camelCase JSON.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub date: chrono::NaiveDate,
    pub departmental_goal: Option<Uuid>,
    /// Owning user id.
    pub user: Uuid,
}

/// A departmental objective from the read-only catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objective {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

/// Fields for a task to be created.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub date: chrono::NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departmental_goal: Option<Uuid>,
}

/// Full set of mutable fields for a task update.
#[derive(Debug, Clone, Serialize)]
pub struct TaskEdit {
    pub title: String,
    pub description: String,
    pub date: chrono::NaiveDate,
    pub completed: bool,
}
