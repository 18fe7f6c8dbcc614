//! Deterministic intent fallback.
//!
//! When the classifier yields a document plan without an intent (or the
//! question never reached a usable classification because no database is
//! configured), the intent is derived from keywords in the lowercased
//! question. This never overrides an explicit classifier intent.

use crate::classifier::Intent;

/// Keywords indicating a summarization request.
const SUMMARIZE_MARKERS: &[&str] = &["summarize", "summary"];

/// Keywords indicating a search request.
const SEARCH_MARKERS: &[&str] = &["find", "search", "where", "contains", "show", "look for"];

/// Derives an intent from the question text.
///
/// Precedence: summarize markers, then search markers, then QA as the
/// general fallback.
pub fn fallback_intent(question: &str) -> Intent {
    let q = question.to_lowercase();

    if SUMMARIZE_MARKERS.iter().any(|m| q.contains(m)) {
        Intent::Summarize
    } else if SEARCH_MARKERS.iter().any(|m| q.contains(m)) {
        Intent::Search
    } else {
        Intent::Qa
    }
}

/// Resolves the effective intent: an explicit classifier intent wins,
/// otherwise fall back to the question heuristics.
pub fn resolve_intent(classified: Option<Intent>, question: &str) -> Intent {
    classified.unwrap_or_else(|| fallback_intent(question))
}
