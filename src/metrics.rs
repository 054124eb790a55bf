/// Metrics and telemetry for the MoveDID resolver
///
/// Prometheus-compatible counters for resolution outcomes and ledger
/// round-trips, exposed on `/metrics`.

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter_vec, Encoder, Histogram, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    /// Resolutions by outcome ("ok" or an error code)
    pub static ref DID_RESOLUTIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "did_resolutions_total",
        "Total number of DID resolutions",
        &["outcome"]
    )
    .unwrap();

    /// End-to-end resolution latency
    pub static ref DID_RESOLUTION_DURATION_SECONDS: Histogram = register_histogram!(
        "did_resolution_duration_seconds",
        "DID resolution latencies in seconds",
        vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .unwrap();

    /// Ledger requests by operation and status
    pub static ref LEDGER_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "ledger_requests_total",
        "Total number of full node requests",
        &["operation", "status"]
    )
    .unwrap();
}

pub fn record_resolution(outcome: &str, elapsed_secs: f64) {
    DID_RESOLUTIONS_TOTAL.with_label_values(&[outcome]).inc();
    DID_RESOLUTION_DURATION_SECONDS.observe(elapsed_secs);
}

pub fn record_ledger_request(operation: &str, status: &str) {
    LEDGER_REQUESTS_TOTAL
        .with_label_values(&[operation, status])
        .inc();
}

/// Encode all registered metrics in the Prometheus text format
pub fn gather() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!(error = %e, "failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
