//! Error types for QueryScope.
//!
//! Defines the main error enum used throughout the engine. Per-document
//! failures in the document execution path are not errors; they are
//! recorded as `Failure` outcomes and never propagate here.

use thiserror::Error;

/// Main error type for QueryScope operations.
#[derive(Error, Debug)]
pub enum QueryScopeError {
    /// The LLM returned output that could not be interpreted as a plan.
    #[error("Classification error: {0}")]
    Classification(String),

    /// Database connection errors (host unreachable, auth failed, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution errors (syntax errors, missing tables, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// LLM API errors (rate limits, auth, timeouts, etc.)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Configuration errors (invalid config file, bad connection string, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QueryScopeError {
    /// Creates a classification error with the given message.
    pub fn classification(msg: impl Into<String>) -> Self {
        Self::Classification(msg.into())
    }

    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates an LLM error with the given message.
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Classification(_) => "Classification Error",
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Llm(_) => "LLM Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// Returns true for failures a caller should treat as a bad request
    /// rather than an execution problem.
    pub fn is_classification(&self) -> bool {
        matches!(self, Self::Classification(_))
    }
}

/// Result type alias using QueryScopeError.
pub type Result<T> = std::result::Result<T, QueryScopeError>;
