//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, status, service
//! - `gateway_request_duration_seconds` (histogram): latency by service
//! - `gateway_auth_failures_total` (counter): rejected credentials by reason
//! - `gateway_forward_errors_total` (counter): backend failures by service, kind
//! - `gateway_forwards_cancelled_total` (counter): calls abandoned by clients
//! - `gateway_inflight_forwards` (gauge): backend calls in flight
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, service: &str, start: Instant) {
    counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "service" => service.to_string()
    )
    .increment(1);
    histogram!("gateway_request_duration_seconds", "service" => service.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_auth_failure(reason: &'static str) {
    counter!("gateway_auth_failures_total", "reason" => reason).increment(1);
}

pub fn record_forward_error(service: &str, kind: &'static str) {
    counter!(
        "gateway_forward_errors_total",
        "service" => service.to_string(),
        "kind" => kind
    )
    .increment(1);
}

pub fn record_forward_cancelled(service: &str) {
    counter!("gateway_forwards_cancelled_total", "service" => service.to_string()).increment(1);
}

pub fn inflight_started() {
    gauge!("gateway_inflight_forwards").increment(1.0);
}

pub fn inflight_finished() {
    gauge!("gateway_inflight_forwards").decrement(1.0);
}
