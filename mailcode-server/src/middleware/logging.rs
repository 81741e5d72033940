//! Request/response logging middleware.

use axum::{body::Body, middleware::Next, response::Response};
use http::{Method, Request, StatusCode, Uri};
use std::time::{Duration, Instant};

/// Decides how a finished request is logged.
pub trait RequestLogger {
    /// Log a request that produced `status` after `latency`.
    fn log(method: &Method, uri: &Uri, status: StatusCode, latency: Duration);
}

/// Logs every request at `info`, failed ones at `warn`.
#[derive(Clone, Copy, Debug)]
pub struct Logger;

impl RequestLogger for Logger {
    fn log(method: &Method, uri: &Uri, status: StatusCode, latency: Duration) {
        let latency_ms = latency.as_millis() as u64;

        if status.is_server_error() {
            tracing::warn!(
                subject = "request",
                category = "http",
                %method,
                path = uri.path(),
                status = status.as_u16(),
                latency_ms,
                "request failed"
            );
        } else {
            tracing::info!(
                subject = "request",
                category = "http",
                %method,
                path = uri.path(),
                status = status.as_u16(),
                latency_ms,
                "request finished"
            );
        }
    }
}

/// Logs requests at `debug` only. Used for noisy routes like healthchecks.
#[derive(Clone, Copy, Debug)]
pub struct DebugOnlyLogger;

impl RequestLogger for DebugOnlyLogger {
    fn log(method: &Method, uri: &Uri, status: StatusCode, latency: Duration) {
        tracing::debug!(
            subject = "request",
            category = "http",
            %method,
            path = uri.path(),
            status = status.as_u16(),
            latency_ms = latency.as_millis() as u64,
            "request finished"
        );
    }
}

/// Middleware logging method, path, status and latency of each request.
pub async fn log_request_response<L: RequestLogger>(
    request: Request<Body>,
    next: Next<Body>,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    L::log(&method, &uri, response.status(), start.elapsed());

    response
}
