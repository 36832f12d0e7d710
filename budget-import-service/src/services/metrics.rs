//! Prometheus metrics for budget-import-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

/// Histogram for database query duration by operation.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "budget_import_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .expect("Failed to register DB_QUERY_DURATION")
});

/// Counter for import runs by mode and outcome.
pub static IMPORT_RUNS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "budget_import_runs_total",
        "Total number of budget import runs",
        &["mode", "status"]
    )
    .expect("Failed to register IMPORT_RUNS")
});

/// Counter for matched rows by match status.
pub static ROW_MATCHES: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "budget_import_row_matches_total",
        "Total number of rows matched, by status",
        &["status"]
    )
    .expect("Failed to register ROW_MATCHES")
});

/// Counter for per-row commit outcomes.
pub static ROW_COMMITS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "budget_import_row_commits_total",
        "Total number of per-row commit attempts, by outcome",
        &["status"]
    )
    .expect("Failed to register ROW_COMMITS")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&IMPORT_RUNS);
    Lazy::force(&ROW_MATCHES);
    Lazy::force(&ROW_COMMITS);
}

/// Get all metrics as Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Record an import run.
pub fn record_import_run(mode: &str, status: &str) {
    IMPORT_RUNS.with_label_values(&[mode, status]).inc();
}

/// Record a row match outcome.
pub fn record_row_match(status: &str) {
    ROW_MATCHES.with_label_values(&[status]).inc();
}

/// Record a per-row commit outcome.
pub fn record_row_commit(status: &str) {
    ROW_COMMITS.with_label_values(&[status]).inc();
}
