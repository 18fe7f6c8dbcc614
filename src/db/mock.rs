//! Mock database clients for testing.
//!
//! Provides in-memory implementations so the engine can be exercised
//! without a live PostgreSQL instance.

use super::{ColumnInfo, DatabaseClient, DatabaseGateway, QueryResult, SchemaSummary, Value};
use crate::error::{QueryScopeError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A mock database client that returns predefined results.
#[derive(Default)]
pub struct MockDatabaseClient {
    schema: SchemaSummary,
    canned_result: Option<QueryResult>,
}

impl MockDatabaseClient {
    /// Creates a new mock client with an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock client with the given schema summary.
    pub fn with_schema(schema: SchemaSummary) -> Self {
        Self {
            schema,
            canned_result: None,
        }
    }

    /// Sets a fixed result returned for every query.
    pub fn with_result(mut self, result: QueryResult) -> Self {
        self.canned_result = Some(result);
        self
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn introspect_schema(&self) -> Result<SchemaSummary> {
        Ok(self.schema.clone())
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        if let Some(result) = &self.canned_result {
            return Ok(result.clone());
        }

        if sql.trim_start().to_uppercase().starts_with("SELECT") {
            Ok(QueryResult::with_data(
                vec![ColumnInfo::new("result", "text")],
                vec![vec![Value::String(format!("Mock result for: {}", sql))]],
            ))
        } else {
            Ok(QueryResult::new())
        }
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A mock client whose queries always fail, for exercising error paths.
#[derive(Default)]
pub struct FailingDatabaseClient {
    message: String,
}

impl FailingDatabaseClient {
    /// Creates a failing client with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn introspect_schema(&self) -> Result<SchemaSummary> {
        Ok(SchemaSummary::new())
    }

    async fn execute_query(&self, _sql: &str) -> Result<QueryResult> {
        Err(QueryScopeError::query(self.message.clone()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A gateway that hands out the same pre-built client for every
/// connection string, counting how many connects were requested.
pub struct StaticGateway {
    client: Arc<dyn DatabaseClient>,
    connects: AtomicUsize,
}

impl StaticGateway {
    /// Creates a gateway serving the given client.
    pub fn new(client: Arc<dyn DatabaseClient>) -> Self {
        Self {
            client,
            connects: AtomicUsize::new(0),
        }
    }

    /// Returns the number of connect calls made so far.
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatabaseGateway for StaticGateway {
    async fn connect(&self, _connection_string: &str) -> Result<Arc<dyn DatabaseClient>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.client))
    }
}
