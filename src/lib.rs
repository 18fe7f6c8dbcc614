//! QueryScope - ask natural-language questions against a PostgreSQL
//! database or a document collection.
//!
//! One LLM call classifies each question into a SQL plan or a document
//! plan (summarize, search, or QA); the engine executes the plan and
//! memoizes successful results in a short-lived cache.

pub mod cache;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod db;
pub mod engine;
pub mod error;
pub mod llm;
pub mod logging;
