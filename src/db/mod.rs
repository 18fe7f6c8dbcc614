//! Database gateway for QueryScope.
//!
//! Provides a trait-based interface for database operations, allowing
//! different backends (and test doubles) to be used interchangeably.

mod mock;
mod postgres;
mod schema;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient, StaticGateway};
pub use postgres::PostgresClient;
pub use schema::{ForeignKey, SchemaSummary, TableSummary};
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait defining the interface for database clients.
///
/// All operations are async and return Results with QueryScopeError.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Introspects the database, returning the compact schema summary.
    async fn introspect_schema(&self) -> Result<SchemaSummary>;

    /// Executes a SQL statement verbatim and returns the results.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;

    /// Closes the database connection pool.
    async fn close(&self) -> Result<()>;
}

/// Connects to the database identified by a connection string.
///
/// This is the central factory for database handles; the orchestrator
/// memoizes the returned clients per connection string.
pub async fn connect(conn_str: &str) -> Result<Box<dyn DatabaseClient>> {
    let config = ConnectionConfig::from_connection_string(conn_str)?;
    let client = PostgresClient::connect(&config).await?;
    Ok(Box::new(client))
}

/// Factory for database clients, keyed by connection string.
///
/// The orchestrator connects through this trait so tests can inject
/// in-memory clients without a live database.
#[async_trait]
pub trait DatabaseGateway: Send + Sync {
    /// Opens (or builds) a client for the given connection string.
    async fn connect(&self, connection_string: &str) -> Result<Arc<dyn DatabaseClient>>;
}

/// The default gateway: real PostgreSQL connections.
#[derive(Debug, Default)]
pub struct PostgresGateway;

#[async_trait]
impl DatabaseGateway for PostgresGateway {
    async fn connect(&self, connection_string: &str) -> Result<Arc<dyn DatabaseClient>> {
        connect(connection_string).await.map(Arc::from)
    }
}
