//! Task and departmental-objective domain models.

/// Database row for `tasks`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskRow {
    pub id: sqlx::types::Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub date: chrono::NaiveDate,
    pub departmental_goal: Option<sqlx::types::Uuid>,
    pub user_id: sqlx::types::Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Database row for `departmental_objectives`.
///
/// Read-only reference data from this system's perspective; rows are
/// owned by an external process.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ObjectiveRow {
    pub id: sqlx::types::Uuid,
    pub title: String,
    pub description: String,
}

/// Fields for a new task. `completed` is always false at creation.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub date: chrono::NaiveDate,
    pub departmental_goal: Option<sqlx::types::Uuid>,
}

/// Full set of mutable task fields for an update.
#[derive(Debug, Clone)]
pub struct TaskUpdate {
    pub title: String,
    pub description: String,
    pub date: chrono::NaiveDate,
    pub completed: bool,
}
