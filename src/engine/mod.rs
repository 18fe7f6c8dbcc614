//! Query orchestration for QueryScope.
//!
//! `QueryEngine` owns the full resolve pipeline: cache lookup, schema
//! introspection, one classification call, plan dispatch, and cache
//! write-back. Database clients are memoized per connection string so
//! repeated questions against the same database reuse one pool.

mod documents;
mod result;
mod sql;

pub use documents::execute_document_plan;
pub use result::{DocumentOutcome, ExecutionResult, Outcome};
pub use sql::execute_sql_plan;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::cache::{cache_key, ResultCache};
use crate::classifier::{classify, fallback_intent, resolve_intent, ClassificationResult};
use crate::config::Config;
use crate::corpus::Corpus;
use crate::db::{DatabaseClient, DatabaseGateway, PostgresGateway, SchemaSummary};
use crate::error::{QueryScopeError, Result};
use crate::llm::{create_client, LlmClient};

/// The query resolution engine.
pub struct QueryEngine {
    llm: Box<dyn LlmClient>,
    gateway: Arc<dyn DatabaseGateway>,
    cache: ResultCache,
    clients: Mutex<HashMap<String, Arc<dyn DatabaseClient>>>,
}

impl QueryEngine {
    /// Creates an engine with explicit components.
    pub fn new(
        llm: Box<dyn LlmClient>,
        gateway: Arc<dyn DatabaseGateway>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            llm,
            gateway,
            cache: ResultCache::with_ttl(cache_ttl),
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an engine from configuration: the configured LLM provider
    /// and real PostgreSQL connections.
    pub fn from_config(config: &Config) -> Result<Self> {
        let llm = create_client(&config.llm)?;
        Ok(Self::new(
            llm,
            Arc::new(PostgresGateway),
            Duration::from_secs(config.cache.ttl_secs),
        ))
    }

    /// Resolves one question end to end.
    ///
    /// Checks the cache first; on a miss, introspects the schema (when a
    /// connection string is given), classifies the question with a single
    /// LLM call, executes the resulting plan, and caches the successful
    /// result. The cached copy always stores `cache_hit = false`; only
    /// the copy returned on a later hit is flagged true.
    pub async fn resolve_query(
        &self,
        question: &str,
        connection_string: Option<&str>,
        corpus: &Corpus,
    ) -> Result<ExecutionResult> {
        let key = cache_key(connection_string.unwrap_or(""), question);

        if let Some(mut hit) = self.cache.get(&key) {
            info!("Serving result from cache");
            hit.set_cache_hit(true);
            return Ok(hit);
        }

        let client = match connection_string {
            Some(cs) => Some(self.client_for(cs).await?),
            None => None,
        };

        let schema = match &client {
            Some(c) => c.introspect_schema().await?,
            None => SchemaSummary::new(),
        };

        let result = match classify(self.llm.as_ref(), question, &schema).await {
            ClassificationResult::Sql { query, explanation } => {
                let client = client.ok_or_else(|| {
                    QueryScopeError::connection(
                        "question requires a database but no connection is configured",
                    )
                })?;
                execute_sql_plan(client.as_ref(), &query, &explanation).await?
            }
            ClassificationResult::Document { intent, keywords } => {
                let intent = resolve_intent(intent, question);
                let results =
                    execute_document_plan(self.llm.as_ref(), intent, &keywords, question, corpus)
                        .await;
                ExecutionResult::Document {
                    intent,
                    results,
                    cache_hit: false,
                }
            }
            ClassificationResult::Unrecognized { raw } => {
                if connection_string.is_none() {
                    // No database to target, so the question can only be
                    // about the corpus; derive the intent heuristically.
                    // With no classifier keywords, the raw question text
                    // is the search needle.
                    let intent = fallback_intent(question);
                    warn!(%intent, "Classification unusable, falling back to document plan");
                    let keywords = vec![question.trim().to_string()];
                    let results = execute_document_plan(
                        self.llm.as_ref(),
                        intent,
                        &keywords,
                        question,
                        corpus,
                    )
                    .await;
                    ExecutionResult::Document {
                        intent,
                        results,
                        cache_hit: false,
                    }
                } else {
                    warn!(raw = %raw, "Classifier output could not be interpreted");
                    return Err(QueryScopeError::classification(
                        "could not interpret the question",
                    ));
                }
            }
        };

        self.cache.set(&key, result.clone());
        Ok(result)
    }

    /// Returns the memoized client for a connection string, connecting
    /// on first use.
    async fn client_for(&self, connection_string: &str) -> Result<Arc<dyn DatabaseClient>> {
        let mut clients = self.clients.lock().await;

        if let Some(client) = clients.get(connection_string) {
            return Ok(Arc::clone(client));
        }

        info!("Opening new database connection");
        let client = self.gateway.connect(connection_string).await?;
        clients.insert(connection_string.to_string(), Arc::clone(&client));
        Ok(client)
    }
}
