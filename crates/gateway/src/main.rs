//! LitForge Gateway
//!
//! Serves the web forms for the literature database.
//! Handles:
//! - PDF upload and ingestion
//! - Listing, download, edit and delete of records
//! - A read-only JSON API
//! - Observability (logging, metrics, tracing)

mod error;
mod handlers;
mod views;

use axum::{
    extract::DefaultBodyLimit,
    response::Redirect,
    routing::get,
    Router,
};
use litforge_common::{
    config::{AppConfig, ObservabilityConfig},
    db::DbPool,
    metrics,
    summarizer::create_summarizer,
    Repository,
};
use litforge_ingestion::IngestionProcessor;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repo: Repository,
    pub processor: Arc<IngestionProcessor>,
    pub metrics: Option<PrometheusHandle>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    init_tracing(&config.observability);

    info!("Starting LitForge Gateway v{}", litforge_common::VERSION);

    let config = Arc::new(config);

    // Initialize metrics
    let metrics_handle = if config.observability.metrics_enabled {
        let handle = PrometheusBuilder::new().install_recorder()?;
        metrics::register_metrics();
        Some(handle)
    } else {
        None
    };

    // Initialize database connection
    let db = DbPool::new(&config.database).await?;
    let repo = Repository::new(db);

    let summarizer = create_summarizer(&config.summarizer)?;
    info!(model = summarizer.model_name(), "Summarizer ready");

    let processor = IngestionProcessor::from_config(&config, repo.clone(), summarizer);

    // Create app state
    let state = AppState {
        config: config.clone(),
        repo,
        processor: Arc::new(processor),
        metrics: metrics_handle,
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr = config.bind_address();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Install the global subscriber; `RUST_LOG` overrides the configured level
fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json_logging {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    let body_limit = DefaultBodyLimit::max(state.config.server.max_upload_bytes);

    Router::new()
        .route("/", get(|| async { Redirect::to("/upload") }))
        // Upload
        .route(
            "/upload",
            get(handlers::upload::upload_form).post(handlers::upload::upload),
        )
        // Literature
        .route("/literature", get(handlers::literature::list))
        .route("/literature/{id}/file", get(handlers::literature::download))
        .route(
            "/literature/{id}/delete",
            get(handlers::literature::confirm_delete).post(handlers::literature::delete),
        )
        // Edit
        .route("/edit", get(handlers::edit::picker))
        .route(
            "/literature/{id}/edit",
            get(handlers::edit::edit_form).post(handlers::edit::save),
        )
        // JSON API
        .route("/api/literature", get(handlers::api::list_literature))
        .route("/api/literature/{id}", get(handlers::api::get_literature))
        // Health and metrics
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .route("/metrics", get(handlers::health::metrics))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_id)
        .layer(request_id)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
