//! Document corpus for QueryScope.
//!
//! Holds the current batch of uploaded documents with their extracted
//! text. The corpus is an explicitly owned, versioned value: each upload
//! batch replaces the previous contents wholesale (no incremental merge),
//! and a request borrows one consistent snapshot for its whole lifetime.

mod loader;

pub use loader::load_directory;

use serde::{Deserialize, Serialize};

/// A single uploaded document with its extracted plain text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DocumentRecord {
    /// Filename, unique within the current batch.
    pub filename: String,

    /// Extracted text. May be empty when extraction produced nothing.
    pub text: String,
}

impl DocumentRecord {
    /// Creates a new document record.
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }

    /// Returns true if the extracted text is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// The current set of uploaded documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    version: u64,
    documents: Vec<DocumentRecord>,
}

impl Corpus {
    /// Creates a new empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the corpus contents with a new batch, clearing prior
    /// documents and bumping the version.
    pub fn replace(&mut self, documents: Vec<DocumentRecord>) {
        self.documents = documents;
        self.version += 1;
    }

    /// Returns the current batch version. Starts at 0 for an empty corpus
    /// and increments on every replacement.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns all documents in the current batch, in upload order.
    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    /// Returns the documents with non-blank text, in upload order.
    pub fn non_blank_documents(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.documents.iter().filter(|d| !d.is_blank())
    }

    /// Returns true if the corpus holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns the number of documents in the current batch.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Searches every document for the query string, case-insensitively,
    /// returning (filename, snippet) pairs around the first occurrence.
    pub fn search_all(&self, query: &str) -> Vec<(String, String)> {
        self.non_blank_documents()
            .filter_map(|doc| {
                find_ignore_case(&doc.text, query)
                    .map(|idx| (doc.filename.clone(), snippet_around(&doc.text, idx)))
            })
            .collect()
    }
}

/// Finds the first case-insensitive occurrence of `needle` in `haystack`,
/// returning the byte index into `haystack` itself.
///
/// Lowercasing can change a string's byte length (U+0130 lowercases to
/// two codepoints), so indexes from a lowercased copy cannot be used to
/// slice the original. This compares codepoint-by-codepoint instead.
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }

    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();

    for (idx, _) in haystack.char_indices() {
        let mut rest = haystack[idx..].chars().flat_map(char::to_lowercase);
        if needle.iter().all(|&n| rest.next() == Some(n)) {
            return Some(idx);
        }
    }

    None
}

/// Width of the context window on each side of a match.
const SNIPPET_RADIUS: usize = 50;

/// Extracts a snippet spanning `SNIPPET_RADIUS` characters before and after
/// the match index, with newlines collapsed to spaces.
///
/// Offsets are clamped to the nearest character boundary so multi-byte
/// text never splits a codepoint.
pub fn snippet_around(text: &str, match_idx: usize) -> String {
    let mut start = match_idx.saturating_sub(SNIPPET_RADIUS);
    while !text.is_char_boundary(start) {
        start -= 1;
    }

    let mut end = (match_idx + SNIPPET_RADIUS).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }

    text[start..end].replace('\n', " ")
}
