//! Integration tests for QueryScope.

pub mod documents_test;
pub mod postgres_test;
pub mod resolve_test;
