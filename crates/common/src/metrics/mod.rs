//! Metrics and observability utilities
//!
//! Metric names share the `litforge` prefix. Recording is a no-op until a
//! recorder (the Prometheus exporter in the gateway) is installed.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};

/// Metrics prefix for all LitForge metrics
pub const METRICS_PREFIX: &str = "litforge";

/// Register all metric descriptions
pub fn register_metrics() {
    // Ingestion metrics
    describe_counter!(
        format!("{}_papers_ingested_total", METRICS_PREFIX),
        Unit::Count,
        "Total papers ingested"
    );

    describe_histogram!(
        format!("{}_ingestion_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "End-to-end ingestion latency in seconds"
    );

    // Text-generation metrics
    describe_counter!(
        format!("{}_generation_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total summary/outline generation requests"
    );

    describe_histogram!(
        format!("{}_generation_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Summary/outline generation latency in seconds"
    );

    // Record lifecycle
    describe_counter!(
        format!("{}_literature_deleted_total", METRICS_PREFIX),
        Unit::Count,
        "Total literature records deleted"
    );

    tracing::info!("Metrics registered");
}

/// Record one summary or outline call
pub fn record_generation(kind: &str, duration_secs: f64, success: bool) {
    let status = if success { "success" } else { "error" };

    counter!(
        format!("{}_generation_requests_total", METRICS_PREFIX),
        "kind" => kind.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        format!("{}_generation_duration_seconds", METRICS_PREFIX),
        "kind" => kind.to_string()
    )
    .record(duration_secs);
}

/// Record a completed ingestion
pub fn record_ingestion(duration_secs: f64) {
    counter!(format!("{}_papers_ingested_total", METRICS_PREFIX)).increment(1);

    histogram!(format!("{}_ingestion_duration_seconds", METRICS_PREFIX))
        .record(duration_secs);
}

/// Record a deleted record and whether its file was removed with it
pub fn record_deletion(file_removed: bool) {
    counter!(
        format!("{}_literature_deleted_total", METRICS_PREFIX),
        "file_removed" => file_removed.to_string()
    )
    .increment(1);
}
