//! Document loading and corpus lifecycle tests.
//!
//! Loads real files from a temporary directory and runs them through
//! the document execution path.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use queryscope::corpus::{load_directory, Corpus};
use queryscope::db::MockDatabaseClient;
use queryscope::db::StaticGateway;
use queryscope::engine::{ExecutionResult, Outcome, QueryEngine};
use queryscope::llm::MockLlmClient;

fn document_engine(llm: MockLlmClient) -> QueryEngine {
    QueryEngine::new(
        Box::new(llm),
        Arc::new(StaticGateway::new(Arc::new(MockDatabaseClient::new()))),
        Duration::from_secs(60),
    )
}

#[test]
fn test_load_directory_picks_up_text_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "meeting notes").unwrap();
    fs::write(dir.path().join("report.md"), "# Q1 report").unwrap();
    fs::write(dir.path().join("data.csv"), "a,b\n1,2").unwrap();
    fs::write(dir.path().join("image.png"), [0u8; 4]).unwrap();

    let documents = load_directory(dir.path()).unwrap();

    let names: Vec<_> = documents.iter().map(|d| d.filename.as_str()).collect();
    assert_eq!(names, vec!["data.csv", "notes.txt", "report.md"]);
}

#[test]
fn test_reload_replaces_previous_batch() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("old.txt"), "old content").unwrap();

    let mut corpus = Corpus::new();
    corpus.replace(load_directory(dir.path()).unwrap());
    assert_eq!(corpus.version(), 1);

    fs::remove_file(dir.path().join("old.txt")).unwrap();
    fs::write(dir.path().join("new.txt"), "new content").unwrap();

    corpus.replace(load_directory(dir.path()).unwrap());

    assert_eq!(corpus.version(), 2);
    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus.documents()[0].filename, "new.txt");
}

#[tokio::test]
async fn test_loaded_files_flow_through_search() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("q1.txt"),
        "Total revenue was $5.2M in Q1.",
    )
    .unwrap();
    fs::write(dir.path().join("empty.txt"), "").unwrap();

    let mut corpus = Corpus::new();
    corpus.replace(load_directory(dir.path()).unwrap());

    let llm = MockLlmClient::new().with_response(
        "revenue",
        r#"{"type": "document", "intent": "search", "keywords": ["revenue"]}"#,
    );
    let engine = document_engine(llm);

    let result = engine
        .resolve_query("find revenue", None, &corpus)
        .await
        .unwrap();

    let ExecutionResult::Document { results, .. } = result else {
        panic!("Expected Document result");
    };
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].filename, "q1.txt");
    assert!(matches!(results[0].outcome, Outcome::KeywordMatch { .. }));
}

#[tokio::test]
async fn test_empty_corpus_yields_empty_results() {
    let llm = MockLlmClient::new().with_response(
        "summarize",
        r#"{"type": "document", "intent": "summarize", "keywords": []}"#,
    );
    let engine = document_engine(llm);

    let result = engine
        .resolve_query("summarize everything", None, &Corpus::new())
        .await
        .unwrap();

    let ExecutionResult::Document { results, .. } = result else {
        panic!("Expected Document result");
    };
    assert!(results.is_empty());
}
