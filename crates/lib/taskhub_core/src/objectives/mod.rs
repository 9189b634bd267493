//! Departmental objective catalog.
//!
//! Read-only reference data: this service lists the catalog but never
//! mutates it. Row lifecycle belongs to an external process.

use sqlx::PgPool;

use crate::models::tasks::ObjectiveRow;
use crate::tasks::TaskError;

/// List the full objective catalog, unfiltered.
pub async fn list_objectives(pool: &PgPool) -> Result<Vec<ObjectiveRow>, TaskError> {
    let rows = sqlx::query_as::<_, ObjectiveRow>(
        "SELECT id, title, description FROM departmental_objectives ORDER BY title",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
