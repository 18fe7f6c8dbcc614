//! QueryScope - ask natural-language questions against a PostgreSQL
//! database or a document collection.

use tracing::{error, info, warn};

use queryscope::cli::Cli;
use queryscope::config::{Config, ConnectionConfig};
use queryscope::corpus::{load_directory, Corpus};
use queryscope::engine::QueryEngine;
use queryscope::error::{QueryScopeError, Result};
use queryscope::logging::init_stderr_logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_stderr_logging();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;

    if let Some(provider) = &cli.llm {
        config.llm.provider = provider.clone();
    }

    // Connection precedence: CLI arguments, then the named connection
    // from config, then the config default, then PG* environment
    // variables filling any gaps.
    let connection = resolve_connection(&cli, &config)?;
    let connection_string = match &connection {
        Some(conn) => {
            info!("Connection: {}", conn.display_string());
            Some(conn.to_connection_string()?)
        }
        None => {
            warn!("No database connection configured; document mode only");
            None
        }
    };

    let mut corpus = Corpus::new();
    if let Some(dir) = &cli.docs {
        let documents = load_directory(dir)?;
        info!(count = documents.len(), "Loaded documents from {}", dir.display());
        corpus.replace(documents);
    }

    let engine = QueryEngine::from_config(&config)?;
    let result = engine
        .resolve_query(&cli.question, connection_string.as_deref(), &corpus)
        .await?;

    let json = serde_json::to_string_pretty(&result)
        .map_err(|e| QueryScopeError::internal(format!("Failed to serialize result: {e}")))?;
    println!("{json}");

    Ok(())
}

/// Resolves the final connection configuration from CLI args, config
/// file, and environment.
fn resolve_connection(cli: &Cli, config: &Config) -> Result<Option<ConnectionConfig>> {
    let mut connection = cli.to_connection_config()?;

    if connection.is_none() {
        if let Some(name) = cli.connection_name() {
            connection = config.get_connection(Some(name)).cloned();
            if connection.is_none() {
                return Err(QueryScopeError::config(format!(
                    "Connection '{}' not found in config file",
                    name
                )));
            }
        }
    }

    if connection.is_none() {
        connection = config.get_connection(None).cloned();
    }

    if let Some(ref mut conn) = connection {
        conn.apply_env_defaults();
    }

    Ok(connection)
}
