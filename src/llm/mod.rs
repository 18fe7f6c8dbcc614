//! LLM integration for QueryScope.
//!
//! Provides the single-turn completion trait the engine talks to, plus
//! concrete clients (OpenAI-compatible HTTP, mock for tests).

pub mod mock;
pub mod openai;
pub mod types;

pub use mock::MockLlmClient;
pub use openai::{OpenAiClient, OpenAiConfig};
pub use types::{Message, Role};

use async_trait::async_trait;
use std::str::FromStr;

use crate::config::LlmConfig;
use crate::error::{QueryScopeError, Result};

/// Trait for LLM clients that can generate completions.
///
/// Single-turn and non-streaming: one prompt in, one text response out.
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given messages.
    async fn complete(&self, messages: &[Message]) -> Result<String>;
}

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    /// OpenAI-compatible chat-completions API (OpenAI, Groq, etc.)
    #[default]
    OpenAi,
    /// Mock client for testing (no API key required)
    Mock,
}

impl LlmProvider {
    /// Returns the provider as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Mock => "mock",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown LLM provider: {}", s)),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Creates an LLM client from configuration.
///
/// The API key is resolved from `OPENAI_API_KEY`; model and endpoint come
/// from the config, with the endpoint defaulting to OpenAI's.
pub fn create_client(config: &LlmConfig) -> Result<Box<dyn LlmClient>> {
    let provider: LlmProvider = config
        .provider
        .parse()
        .map_err(QueryScopeError::config)?;

    match provider {
        LlmProvider::OpenAi => {
            let key = std::env::var("OPENAI_API_KEY").map_err(|_| {
                QueryScopeError::llm("No API key configured. Set OPENAI_API_KEY.")
            })?;
            let mut client_config = OpenAiConfig::new(key, config.model.clone());
            if let Some(url) = &config.base_url {
                client_config = client_config.with_api_url(url.clone());
            }
            Ok(Box::new(OpenAiClient::new(client_config)?))
        }
        LlmProvider::Mock => Ok(Box::new(MockLlmClient::new())),
    }
}
