//! PostgreSQL integration tests.
//!
//! These tests require a running PostgreSQL database; they skip
//! themselves when DATABASE_URL is not set.

use queryscope::config::ConnectionConfig;
use queryscope::db::{DatabaseClient, PostgresClient, Value};

/// Helper to get test database URL from environment.
fn get_test_database_url() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

/// Helper to create a test client.
async fn get_test_client() -> Option<PostgresClient> {
    let url = get_test_database_url()?;
    let config = ConnectionConfig::from_connection_string(&url).ok()?;
    PostgresClient::connect(&config).await.ok()
}

#[tokio::test]
async fn test_execute_simple_select() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let result = client
        .execute_query("SELECT 1 as num, 'hello' as greeting")
        .await
        .unwrap();

    assert_eq!(result.columns.len(), 2);
    assert_eq!(result.columns[0].name, "num");
    assert_eq!(result.columns[1].name, "greeting");
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0][0], Value::Int(1));
    assert_eq!(result.rows[0][1], Value::String("hello".to_string()));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_introspect_schema_lists_tables() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let schema = client.introspect_schema().await.unwrap();

    // Every table must carry at least one column.
    for table in &schema.tables {
        assert!(!table.name.is_empty());
        assert!(!table.columns.is_empty());
    }

    // Foreign keys must reference known tables.
    for fk in &schema.foreign_keys {
        assert!(schema.tables.iter().any(|t| t.name == fk.from_table));
        assert!(schema.tables.iter().any(|t| t.name == fk.to_table));
    }

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_query_error_includes_detail() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let err = client
        .execute_query("SELECT * FROM table_that_does_not_exist_xyz")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("does not exist"));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_null_values_map_to_null() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let result = client
        .execute_query("SELECT NULL::int as missing")
        .await
        .unwrap();

    assert_eq!(result.rows[0][0], Value::Null);

    client.close().await.unwrap();
}
