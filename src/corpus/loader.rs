//! Filesystem loader for plain-text documents.
//!
//! Reads one upload batch from a directory. Only plain-text formats are
//! handled here; richer extraction (PDF, DOCX) is an external concern.

use std::path::Path;

use tracing::{debug, warn};

use crate::corpus::DocumentRecord;
use crate::error::{QueryScopeError, Result};

/// File extensions treated as plain text.
const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "csv"];

/// Loads every supported file in `dir` into a document batch.
///
/// Files are returned in name order. Unsupported extensions are skipped;
/// unreadable files are skipped with a warning rather than failing the
/// batch.
pub fn load_directory(dir: &Path) -> Result<Vec<DocumentRecord>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        QueryScopeError::config(format!("Failed to read documents directory {}: {e}", dir.display()))
    })?;

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        })
        .collect();
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                debug!(file = %filename, bytes = text.len(), "Loaded document");
                documents.push(DocumentRecord { filename, text });
            }
            Err(e) => {
                warn!(file = %filename, "Skipping unreadable document: {e}");
            }
        }
    }

    Ok(documents)
}
