//! LitForge ingestion CLI
//!
//! Ingests a local PDF through the same pipeline the web upload uses and
//! prints the id of the new record.

use anyhow::Context;
use clap::Parser;
use litforge_common::{config::AppConfig, db::DbPool, summarizer::create_summarizer, Repository, VERSION};
use litforge_ingestion::IngestionProcessor;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ingest", about = "Ingest a PDF into the literature database", version)]
struct Cli {
    /// Path to the PDF file
    path: PathBuf,

    /// Read configuration from this file instead of the layered defaults
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::load(),
    }
    .context("Failed to load configuration")?;

    // Initialize tracing; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if config.observability.json_logging {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!("Starting LitForge ingestion v{}", VERSION);

    let db = DbPool::new(&config.database).await?;
    let summarizer = create_summarizer(&config.summarizer)?;
    let processor = IngestionProcessor::from_config(&config, Repository::new(db), summarizer);

    let record = processor
        .ingest_path(&cli.path)
        .await
        .with_context(|| format!("Failed to ingest {}", cli.path.display()))?;

    info!(id = record.id, title = %record.title, "Ingestion complete");
    println!("{}", record.id);

    Ok(())
}
