//! Document plan execution.
//!
//! Processes every non-blank document in the corpus according to the
//! resolved intent. Summaries and answers each cost one LLM call per
//! document, issued sequentially; a failure on one document is recorded
//! as a `Failure` outcome and never aborts the batch. Search is a pure
//! substring scan with no LLM involvement.

use tracing::{info, warn};

use crate::classifier::Intent;
use crate::corpus::{find_ignore_case, snippet_around, Corpus, DocumentRecord};
use crate::engine::{DocumentOutcome, Outcome};
use crate::error::Result;
use crate::llm::{LlmClient, Message};

/// Character budget for the summarize prompt.
const SUMMARIZE_PREFIX_CHARS: usize = 3000;

/// Character budget for the QA prompt.
const QA_PREFIX_CHARS: usize = 8000;

/// Executes a document plan against the current corpus snapshot.
///
/// Documents with blank text are skipped entirely. For the search
/// intent, an empty keyword list matches nothing.
pub async fn execute_document_plan(
    llm: &dyn LlmClient,
    intent: Intent,
    keywords: &[String],
    question: &str,
    corpus: &Corpus,
) -> Vec<DocumentOutcome> {
    info!(
        intent = %intent,
        documents = corpus.len(),
        corpus_version = corpus.version(),
        "Executing document plan"
    );

    let mut outcomes = Vec::new();

    for doc in corpus.non_blank_documents() {
        match intent {
            Intent::Summarize => {
                let outcome = match summarize_document(llm, doc).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        warn!(filename = %doc.filename, error = %e, "Summarization failed");
                        Outcome::Failure {
                            error: format!("Summarization failed: {}", e),
                        }
                    }
                };
                outcomes.push(DocumentOutcome::new(&doc.filename, outcome));
            }
            Intent::Search => {
                search_document(doc, keywords, &mut outcomes);
            }
            Intent::Qa => {
                let outcome = match answer_from_document(llm, question, doc).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        warn!(filename = %doc.filename, error = %e, "QA failed");
                        Outcome::Failure {
                            error: format!("QA failed: {}", e),
                        }
                    }
                };
                outcomes.push(DocumentOutcome::new(&doc.filename, outcome));
            }
        }
    }

    info!(outcomes = outcomes.len(), "Document plan completed");
    outcomes
}

/// Summarizes one document from a bounded text prefix.
async fn summarize_document(llm: &dyn LlmClient, doc: &DocumentRecord) -> Result<Outcome> {
    let prefix = char_prefix(&doc.text, SUMMARIZE_PREFIX_CHARS);
    let prompt = format!("Summarize this document briefly:\n{}", prefix);

    let reply = llm.complete(&[Message::user(prompt)]).await?;
    Ok(Outcome::Summary {
        summary: reply.trim().to_string(),
    })
}

/// Answers the question from one document's bounded text prefix.
async fn answer_from_document(
    llm: &dyn LlmClient,
    question: &str,
    doc: &DocumentRecord,
) -> Result<Outcome> {
    let prefix = char_prefix(&doc.text, QA_PREFIX_CHARS);
    let prompt = format!(
        "Answer the question '{}' using the content below:\n{}",
        question, prefix
    );

    let reply = llm.complete(&[Message::user(prompt)]).await?;
    Ok(Outcome::Answer {
        answer: reply.trim().to_string(),
    })
}

/// Scans one document for every keyword, recording a match outcome with
/// context per keyword found. No keywords means no matches.
fn search_document(doc: &DocumentRecord, keywords: &[String], outcomes: &mut Vec<DocumentOutcome>) {
    for keyword in keywords {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            continue;
        }
        if let Some(idx) = find_ignore_case(&doc.text, keyword) {
            outcomes.push(DocumentOutcome::new(
                &doc.filename,
                Outcome::KeywordMatch {
                    keyword: keyword.to_string(),
                    snippet: snippet_around(&doc.text, idx),
                },
            ));
        }
    }
}

/// Returns the prefix of `text` holding at most `max_chars` characters,
/// cut on a character boundary.
fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
