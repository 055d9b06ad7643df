//! Prometheus metrics for the API server.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Initialize the Prometheus metrics recorder.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "vsep_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "vsep_http_request_duration_seconds";

    // Separation pipeline metrics
    pub const SEPARATIONS_TOTAL: &str = "vsep_separations_total";
    pub const SEPARATION_DURATION_SECONDS: &str = "vsep_separation_duration_seconds";
    pub const SEGMENTS_DETECTED_TOTAL: &str = "vsep_segments_detected_total";

    // Rate limiting metrics
    pub const RATE_LIMIT_HITS_TOTAL: &str = "vsep_rate_limit_hits_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a completed separation request.
pub fn record_separation(backend: &str, outcome: &str, duration_secs: f64, segments: usize) {
    let labels = [
        ("backend", backend.to_string()),
        ("outcome", outcome.to_string()),
    ];
    counter!(names::SEPARATIONS_TOTAL, &labels).increment(1);
    histogram!(names::SEPARATION_DURATION_SECONDS, &labels).record(duration_secs);
    counter!(names::SEGMENTS_DETECTED_TOTAL).increment(segments as u64);
}

/// Record a rate limit rejection.
pub fn record_rate_limit_hit(path: &str) {
    let labels = [("path", path.to_string())];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

/// Middleware that records request counts and latency.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}
