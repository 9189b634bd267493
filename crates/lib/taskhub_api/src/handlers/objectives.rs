//! Departmental objective request handlers.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::models::ObjectiveResponse;
use crate::services::tasks;

/// `GET /departmental-goals` — list the objective catalog. No auth required.
pub async fn list_departmental_goals_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ObjectiveResponse>>> {
    let resp = tasks::list_objectives(&state.pool).await?;
    Ok(Json(resp))
}
