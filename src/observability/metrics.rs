//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method, status, upstream
//! - `proxy_request_duration_seconds` (histogram): end-to-end latency
//!
//! Recording goes through the `metrics` facade and is a no-op until a
//! recorder is installed.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;

pub const PROXY_REQUESTS_TOTAL: &str = "proxy_requests_total";
pub const PROXY_REQUEST_DURATION_SECONDS: &str = "proxy_request_duration_seconds";

/// Start the Prometheus scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!(
                PROXY_REQUESTS_TOTAL,
                Unit::Count,
                "Total number of requests handled by the proxy."
            );
            describe_histogram!(
                PROXY_REQUEST_DURATION_SECONDS,
                Unit::Seconds,
                "Time from receiving a request to producing its response."
            );
            tracing::info!(address = %addr, "Metrics endpoint listening");
        }
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, upstream: &str, start: Instant) {
    metrics::counter!(
        PROXY_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "status" => status.to_string(),
        "upstream" => upstream.to_string()
    )
    .increment(1);

    metrics::histogram!(
        PROXY_REQUEST_DURATION_SECONDS,
        "method" => method.to_string(),
        "status" => status.to_string(),
        "upstream" => upstream.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
