//! SQL plan execution.
//!
//! Runs the classifier-produced statement verbatim against the database
//! and shapes the rows into column-keyed mappings. No rewriting, no
//! statement-kind filtering: database errors surface as-is.

use tracing::info;

use crate::db::DatabaseClient;
use crate::engine::ExecutionResult;
use crate::error::Result;

/// Executes a SQL plan and shapes the result for output.
pub async fn execute_sql_plan(
    db: &dyn DatabaseClient,
    query: &str,
    explanation: &str,
) -> Result<ExecutionResult> {
    info!(sql = query, "Executing SQL plan");

    let result = db.execute_query(query).await?;
    let rows = result.into_mapped_rows();

    info!(row_count = rows.len(), "SQL plan completed");

    Ok(ExecutionResult::Database {
        sql: query.to_string(),
        rows,
        explanation: explanation.to_string(),
        cache_hit: false,
    })
}
