//! Metrics collection.
//!
//! # Metrics
//! - `cryptounifier_requests_total` (counter): requests by action, outcome
//! - `cryptounifier_request_duration_seconds` (histogram): round-trip latency by action
//!
//! # Design Decisions
//! - `action` is the last path segment so currencies do not explode label cardinality

use std::time::Instant;

/// Label value for a request path, e.g. `btc/send-transaction` → `send-transaction`.
pub fn action_label(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

/// Record a finished wallet request.
pub fn record_request(path: &str, outcome: &'static str, start: Instant) {
    let action = action_label(path);
    metrics::counter!(
        "cryptounifier_requests_total",
        "action" => action.clone(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("cryptounifier_request_duration_seconds", "action" => action)
        .record(start.elapsed().as_secs_f64());
}
