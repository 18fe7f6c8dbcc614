//! Intent classification for QueryScope.
//!
//! Sends the user question and schema summary to the LLM in a single
//! completion call and parses the structured decision: a SQL plan, a
//! document plan, or `Unrecognized` when the output does not validate.

mod fallback;
mod parser;
mod prompt;

pub use fallback::{fallback_intent, resolve_intent};
pub use parser::parse_classification;
pub use prompt::{build_classification_messages, build_system_prompt};

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::db::SchemaSummary;
use crate::llm::LlmClient;

/// The classified purpose of a document-mode question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Summarize each document.
    Summarize,
    /// Find keyword mentions with surrounding context.
    Search,
    /// Answer the question from each document's content.
    Qa,
}

impl Intent {
    /// Returns the intent as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::Search => "search",
            Self::Qa => "qa",
        }
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summarize" => Ok(Self::Summarize),
            "search" => Ok(Self::Search),
            "qa" => Ok(Self::Qa),
            _ => Err(format!("Unknown intent: {}", s)),
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The classifier's decision for one request. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationResult {
    /// The question maps to a SQL statement against the database.
    Sql {
        /// The statement to execute verbatim.
        query: String,
        /// Model-provided explanation of the statement.
        explanation: String,
    },
    /// The question targets the document corpus.
    Document {
        /// Explicit intent, when the model supplied one.
        intent: Option<Intent>,
        /// Keywords for the search intent.
        keywords: Vec<String>,
    },
    /// The model's output could not be interpreted.
    Unrecognized {
        /// The raw model output, for diagnostics.
        raw: String,
    },
}

/// Classifies a question against a schema summary.
///
/// Issues exactly one completion call. A transport failure is not
/// retried; it surfaces as `Unrecognized` carrying the error text, the
/// same way unparseable output does.
pub async fn classify(
    llm: &dyn LlmClient,
    question: &str,
    schema: &SchemaSummary,
) -> ClassificationResult {
    let messages = build_classification_messages(question, schema);

    match llm.complete(&messages).await {
        Ok(content) => {
            let result = parse_classification(&content);
            debug!(?result, "Classified question");
            result
        }
        Err(e) => {
            debug!(error = %e, "Classification call failed");
            ClassificationResult::Unrecognized { raw: e.to_string() }
        }
    }
}
