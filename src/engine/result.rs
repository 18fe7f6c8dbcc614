//! Final result shapes returned to callers.
//!
//! Results are self-describing JSON: a `mode` tag distinguishes database
//! answers from document answers, and every result carries a `cache_hit`
//! flag. Document results flatten their per-document outcome fields so
//! the output stays a simple list of records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classifier::Intent;
use crate::db::Value;

/// A fully resolved answer for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ExecutionResult {
    /// Answer produced by executing SQL against the database.
    Database {
        /// The executed statement.
        sql: String,
        /// Result rows keyed by column name.
        rows: Vec<BTreeMap<String, Value>>,
        /// Model-provided explanation of the statement.
        explanation: String,
        /// True when served from the result cache.
        cache_hit: bool,
    },
    /// Answer produced from the document corpus.
    Document {
        /// The effective intent after fallback resolution.
        intent: Intent,
        /// One outcome per processed document (or per keyword match).
        results: Vec<DocumentOutcome>,
        /// True when served from the result cache.
        cache_hit: bool,
    },
}

impl ExecutionResult {
    /// Returns the cache flag.
    pub fn cache_hit(&self) -> bool {
        match self {
            Self::Database { cache_hit, .. } | Self::Document { cache_hit, .. } => *cache_hit,
        }
    }

    /// Sets the cache flag in place.
    pub fn set_cache_hit(&mut self, hit: bool) {
        match self {
            Self::Database { cache_hit, .. } | Self::Document { cache_hit, .. } => {
                *cache_hit = hit;
            }
        }
    }
}

/// The outcome of processing one document (or one keyword match in it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutcome {
    /// Source document filename.
    pub filename: String,

    /// The outcome payload, flattened into the record.
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl DocumentOutcome {
    /// Creates an outcome record for a document.
    pub fn new(filename: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            filename: filename.into(),
            outcome,
        }
    }
}

/// Per-document outcome payload. Untagged: each variant has a distinct
/// field name, so records serialize flat ({"summary": ...},
/// {"keyword": ..., "snippet": ...}, {"answer": ...}, {"error": ...}).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    /// A keyword occurrence with surrounding context.
    KeywordMatch {
        /// The matched keyword.
        keyword: String,
        /// Context window around the first occurrence.
        snippet: String,
    },
    /// A generated summary.
    Summary {
        /// The summary text.
        summary: String,
    },
    /// An answer derived from the document.
    Answer {
        /// The answer text.
        answer: String,
    },
    /// Processing this document failed; others were unaffected.
    Failure {
        /// Human-readable failure reason.
        error: String,
    },
}
