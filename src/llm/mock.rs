//! Mock LLM client for testing.
//!
//! Returns canned responses based on input patterns, can simulate
//! per-request failures, and counts outbound calls.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{QueryScopeError, Result};
use crate::llm::types::{Message, Role};
use crate::llm::LlmClient;

/// Mock LLM client with pattern → response mappings.
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    /// Custom response mappings (pattern -> response), checked in order.
    responses: Vec<(String, String)>,
    /// Patterns whose completions fail with the given reason.
    failures: Vec<(String, String)>,
    /// Number of completion calls issued.
    calls: Arc<AtomicUsize>,
}

impl MockLlmClient {
    /// Creates a new mock client with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a response mapping: when the last user message contains
    /// `pattern` (case-insensitive), the mock returns `response`.
    pub fn with_response(
        mut self,
        pattern: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.responses.push((pattern.into(), response.into()));
        self
    }

    /// Makes completions containing `pattern` fail with `reason`.
    pub fn with_failure(mut self, pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        self.failures.push((pattern.into(), reason.into()));
        self
    }

    /// Returns the number of completion calls issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Extracts the last user message content from a message list.
    fn extract_user_input(messages: &[Message]) -> String {
        messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let input = Self::extract_user_input(messages).to_lowercase();

        for (pattern, reason) in &self.failures {
            if input.contains(&pattern.to_lowercase()) {
                return Err(QueryScopeError::llm(reason.clone()));
            }
        }

        for (pattern, response) in &self.responses {
            if input.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        Ok("I don't understand that question.".to_string())
    }
}
