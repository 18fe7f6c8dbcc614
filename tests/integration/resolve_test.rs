//! End-to-end resolve tests against mock clients.
//!
//! Exercises the full pipeline: classification, plan dispatch, document
//! and SQL execution, and result caching.

use std::sync::Arc;
use std::time::Duration;

use queryscope::classifier::Intent;
use queryscope::corpus::{Corpus, DocumentRecord};
use queryscope::db::{
    ColumnInfo, DatabaseClient, MockDatabaseClient, QueryResult, StaticGateway, Value,
};
use queryscope::engine::{ExecutionResult, Outcome, QueryEngine};
use queryscope::llm::MockLlmClient;

const CONN: &str = "postgres://localhost:5432/testdb";

fn engine_with(llm: MockLlmClient, client: Arc<dyn DatabaseClient>) -> QueryEngine {
    QueryEngine::new(
        Box::new(llm),
        Arc::new(StaticGateway::new(client)),
        Duration::from_secs(60),
    )
}

fn document_engine(llm: MockLlmClient) -> QueryEngine {
    engine_with(llm, Arc::new(MockDatabaseClient::new()))
}

fn reports_corpus() -> Corpus {
    let mut corpus = Corpus::new();
    corpus.replace(vec![
        DocumentRecord::new("q1_report.txt", "Total revenue was $5.2M in Q1, up 12%."),
        DocumentRecord::new("meeting_notes.txt", "Discussed hiring plans and office move."),
        DocumentRecord::new("q2_report.txt", "Q2 revenue came in flat at $5.2M."),
    ]);
    corpus
}

#[tokio::test]
async fn test_sql_question_returns_mapped_rows() {
    let llm = MockLlmClient::new().with_response(
        "salaries",
        r#"{"type": "sql", "query": "SELECT name, salary FROM employees ORDER BY salary DESC", "explanation": "salaries, highest first"}"#,
    );
    let canned = QueryResult::with_data(
        vec![
            ColumnInfo::new("name", "varchar"),
            ColumnInfo::new("salary", "integer"),
        ],
        vec![
            vec![Value::from("Alice"), Value::Int(90000)],
            vec![Value::from("Bob"), Value::Int(80000)],
        ],
    );
    let engine = engine_with(llm, Arc::new(MockDatabaseClient::new().with_result(canned)));

    let result = engine
        .resolve_query("show all salaries", Some(CONN), &Corpus::new())
        .await
        .unwrap();

    match result {
        ExecutionResult::Database {
            sql,
            rows,
            explanation,
            cache_hit,
        } => {
            assert!(sql.starts_with("SELECT name, salary"));
            assert_eq!(explanation, "salaries, highest first");
            assert!(!cache_hit);
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0]["name"], Value::from("Alice"));
            assert_eq!(rows[1]["salary"], Value::Int(80000));
        }
        other => panic!("Expected Database result, got {:?}", other),
    }
}

#[tokio::test]
async fn test_repeated_question_is_cache_hit_with_identical_payload() {
    let llm = MockLlmClient::new().with_response(
        "salaries",
        r#"{"type": "sql", "query": "SELECT name, salary FROM employees", "explanation": ""}"#,
    );
    let canned = QueryResult::with_data(
        vec![ColumnInfo::new("name", "varchar")],
        vec![vec![Value::from("Alice")]],
    );
    let engine = engine_with(llm, Arc::new(MockDatabaseClient::new().with_result(canned)));
    let corpus = Corpus::new();

    let first = engine
        .resolve_query("show all salaries", Some(CONN), &corpus)
        .await
        .unwrap();
    let mut second = engine
        .resolve_query("show all salaries", Some(CONN), &corpus)
        .await
        .unwrap();

    assert!(!first.cache_hit());
    assert!(second.cache_hit());

    second.set_cache_hit(false);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_cache_hit_skips_llm_and_database() {
    let llm = MockLlmClient::new().with_response(
        "salaries",
        r#"{"type": "sql", "query": "SELECT 1", "explanation": ""}"#,
    );
    let call_counter = llm.clone();
    let engine = engine_with(llm, Arc::new(MockDatabaseClient::new()));
    let corpus = Corpus::new();

    engine
        .resolve_query("show all salaries", Some(CONN), &corpus)
        .await
        .unwrap();
    engine
        .resolve_query("show all salaries", Some(CONN), &corpus)
        .await
        .unwrap();

    // Only the first resolve reached the classifier.
    assert_eq!(call_counter.call_count(), 1);
}

#[tokio::test]
async fn test_search_reports_every_matching_document() {
    let llm = MockLlmClient::new().with_response(
        "revenue",
        r#"{"type": "document", "intent": "search", "keywords": ["revenue"]}"#,
    );
    let engine = document_engine(llm);

    let result = engine
        .resolve_query("find mentions of revenue", None, &reports_corpus())
        .await
        .unwrap();

    match result {
        ExecutionResult::Document { intent, results, .. } => {
            assert_eq!(intent, Intent::Search);
            let filenames: Vec<_> = results.iter().map(|r| r.filename.as_str()).collect();
            assert_eq!(filenames, vec!["q1_report.txt", "q2_report.txt"]);
        }
        other => panic!("Expected Document result, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_snippet_surrounds_the_match() {
    let llm = MockLlmClient::new().with_response(
        "revenue",
        r#"{"type": "document", "intent": "search", "keywords": ["revenue"]}"#,
    );
    let engine = document_engine(llm);

    let padding = "x".repeat(80);
    let mut corpus = Corpus::new();
    corpus.replace(vec![DocumentRecord::new(
        "padded.txt",
        format!("{padding}\nrevenue grew steadily\n{padding}"),
    )]);

    let result = engine
        .resolve_query("find revenue", None, &corpus)
        .await
        .unwrap();

    let ExecutionResult::Document { results, .. } = result else {
        panic!("Expected Document result");
    };
    let Outcome::KeywordMatch { keyword, snippet } = &results[0].outcome else {
        panic!("Expected KeywordMatch, got {:?}", results[0].outcome);
    };

    assert_eq!(keyword, "revenue");
    assert!(snippet.contains("revenue grew"));
    // Bounded context window, newlines collapsed.
    assert!(snippet.len() <= 120);
    assert!(!snippet.contains('\n'));
}

#[tokio::test]
async fn test_fenced_classifier_output_resolves_like_bare_json() {
    let bare_llm = MockLlmClient::new().with_response(
        "revenue",
        r#"{"type": "document", "intent": "search", "keywords": ["revenue"]}"#,
    );
    let fenced_llm = MockLlmClient::new().with_response(
        "revenue",
        "```json\n{\"type\": \"document\", \"intent\": \"search\", \"keywords\": [\"revenue\"]}\n```",
    );

    let corpus = reports_corpus();
    let bare = document_engine(bare_llm)
        .resolve_query("find mentions of revenue", None, &corpus)
        .await
        .unwrap();
    let fenced = document_engine(fenced_llm)
        .resolve_query("find mentions of revenue", None, &corpus)
        .await
        .unwrap();

    assert_eq!(bare, fenced);
}

#[tokio::test]
async fn test_summarize_failure_contained_to_one_document() {
    // Three documents; the middle one poisons its summarize prompt.
    let llm = MockLlmClient::new()
        .with_failure("do-not-summarize", "model unavailable")
        .with_response("Summarize", "A short summary.");
    let engine = document_engine(llm);

    let mut corpus = Corpus::new();
    corpus.replace(vec![
        DocumentRecord::new("a.txt", "first report body"),
        DocumentRecord::new("b.txt", "do-not-summarize sentinel body"),
        DocumentRecord::new("c.txt", "third report body"),
    ]);

    let result = engine
        .resolve_query("summarize all reports", None, &corpus)
        .await
        .unwrap();

    let ExecutionResult::Document { intent, results, .. } = result else {
        panic!("Expected Document result");
    };
    assert_eq!(intent, Intent::Summarize);
    assert_eq!(results.len(), 3);
    assert!(matches!(results[0].outcome, Outcome::Summary { .. }));
    match &results[1].outcome {
        Outcome::Failure { error } => assert!(error.contains("model unavailable")),
        other => panic!("Expected Failure, got {:?}", other),
    }
    assert!(matches!(results[2].outcome, Outcome::Summary { .. }));
}

#[tokio::test]
async fn test_unclassifiable_question_without_connection_falls_back() {
    // The default mock reply is prose, not JSON, so classification fails
    // and the fallback heuristics take over: "find" means search, with
    // the whole question text as the needle.
    let llm = MockLlmClient::new();
    let engine = document_engine(llm);

    let mut corpus = Corpus::new();
    corpus.replace(vec![DocumentRecord::new(
        "finance.txt",
        "Action item: find the budget report for 2026 and file it.",
    )]);

    let result = engine
        .resolve_query("find the budget report", None, &corpus)
        .await
        .unwrap();

    match result {
        ExecutionResult::Document { intent, results, .. } => {
            assert_eq!(intent, Intent::Search);
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].filename, "finance.txt");
        }
        other => panic!("Expected Document result, got {:?}", other),
    }
}

#[tokio::test]
async fn test_explicit_search_with_empty_keywords_yields_no_matches() {
    // An explicit search plan with an empty keyword list must not fall
    // back to scanning for the question text.
    let llm = MockLlmClient::new().with_response(
        "budget",
        r#"{"type": "document", "intent": "search", "keywords": []}"#,
    );
    let engine = document_engine(llm);

    let mut corpus = Corpus::new();
    corpus.replace(vec![DocumentRecord::new(
        "finance.txt",
        "find the budget report is literally in this text",
    )]);

    let result = engine
        .resolve_query("find the budget report", None, &corpus)
        .await
        .unwrap();

    match result {
        ExecutionResult::Document { intent, results, .. } => {
            assert_eq!(intent, Intent::Search);
            assert!(results.is_empty());
        }
        other => panic!("Expected Document result, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unclassifiable_question_with_connection_fails() {
    let llm = MockLlmClient::new();
    let engine = document_engine(llm);

    let err = engine
        .resolve_query("gibberish", Some(CONN), &Corpus::new())
        .await
        .unwrap_err();

    assert!(err.is_classification());
}

#[tokio::test]
async fn test_qa_answers_come_from_each_document() {
    let llm = MockLlmClient::new()
        .with_response("Answer the question", "Revenue was $5.2M.")
        .with_response(
            "what was the revenue",
            r#"{"type": "document", "intent": "qa", "keywords": []}"#,
        );
    let engine = document_engine(llm);

    let result = engine
        .resolve_query("what was the revenue?", None, &reports_corpus())
        .await
        .unwrap();

    let ExecutionResult::Document { intent, results, .. } = result else {
        panic!("Expected Document result");
    };
    assert_eq!(intent, Intent::Qa);
    assert_eq!(results.len(), 3);
    for outcome in &results {
        assert!(matches!(outcome.outcome, Outcome::Answer { .. }));
    }
}

#[tokio::test]
async fn test_result_json_is_self_describing() {
    let llm = MockLlmClient::new().with_response(
        "revenue",
        r#"{"type": "document", "intent": "search", "keywords": ["revenue"]}"#,
    );
    let engine = document_engine(llm);

    let result = engine
        .resolve_query("find mentions of revenue", None, &reports_corpus())
        .await
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["mode"], "document");
    assert_eq!(json["intent"], "search");
    assert_eq!(json["cache_hit"], false);
    assert_eq!(json["results"][0]["keyword"], "revenue");
    assert!(json["results"][0]["snippet"].is_string());
}
