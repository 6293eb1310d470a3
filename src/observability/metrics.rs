//! Metrics collection and exposition.
//!
//! # Metrics
//! - `roster_requests_total` (counter): requests by route and status
//! - `roster_request_duration_seconds` (histogram): latency by route
//! - `roster_messages_total` (counter): provider sends by outcome
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled API request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    ::metrics::counter!(
        "roster_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("roster_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record one provider send.
pub fn record_message(delivered: bool) {
    let outcome = if delivered { "sent" } else { "failed" };
    ::metrics::counter!("roster_messages_total", "outcome" => outcome).increment(1);
}
