//! FAQ Assistant server
//!
//! Answers questions from a stored knowledge base and falls back to an LLM
//! when nothing matches.

mod page;
mod routes;
mod server;

use anyhow::Context;
use clap::Parser;
use faq_core::{config::AppConfig, logging};
use faq_knowledge::{Resolver, SqliteStore};
use faq_llm::{create_client, AnswerGenerator};
use page::HomePage;
use server::AppState;
use std::path::PathBuf;
use std::sync::Arc;

/// FAQ Assistant - knowledge base answers with LLM fallback
#[derive(Parser, Debug)]
#[command(name = "faq-assistant")]
#[command(about = "Knowledge base question answering with LLM fallback", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, env = "FAQ_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short = 'P', long)]
    port: Option<u16>,

    /// SQLite database path
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// LLM provider (openai, ollama)
    #[arg(short, long)]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long)]
    model: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config)?.with_overrides(
        cli.host,
        cli.port,
        cli.database,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("FAQ Assistant starting");
    tracing::debug!("Database: {:?}", config.database);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    config.validate()?;

    let store = Arc::new(
        SqliteStore::open(&config.database)
            .with_context(|| format!("opening database {:?}", config.database))?,
    );

    let client = create_client(
        &config.provider,
        config.endpoint.as_deref(),
        config.api_key.as_deref(),
    )
    .map_err(anyhow::Error::msg)?;

    let resolver = Resolver::new(store.clone(), AnswerGenerator::new(client, &config.model));
    let home = HomePage::load(&config.templates_dir).context("loading home page template")?;

    let state = AppState::new(resolver, store.clone(), store, home);

    let result = server::run(state, &config.bind_address()).await;
    if let Err(e) = &result {
        tracing::error!("Server stopped: {:#}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "faq-assistant",
            "--host",
            "0.0.0.0",
            "-P",
            "8080",
            "--database",
            "/tmp/faq.sqlite",
            "--provider",
            "ollama",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/faq.sqlite")));
        assert_eq!(cli.provider.as_deref(), Some("ollama"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_rejects_bad_port() {
        assert!(Cli::try_parse_from(["faq-assistant", "--port", "http"]).is_err());
    }
}
