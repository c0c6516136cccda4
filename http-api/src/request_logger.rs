//! Structured request logging middleware
//!
//! Emits one `tracing` event per request with method, path, status and
//! latency. Query strings are included with long values truncated.

use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;

/// Maximum length for the logged query string before truncation
const MAX_QUERY_LENGTH: usize = 60;

/// Truncation suffix for long query strings
const TRUNCATION_SUFFIX: &str = "...";

/// Request logging middleware
pub async fn request_logging_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(truncate_query).unwrap_or_default();

    let response = next.run(request).await;
    let latency_ms = start_time.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        tracing::error!(%method, %path, %query, status, latency_ms, "Request completed");
    } else {
        tracing::info!(%method, %path, %query, status, latency_ms, "Request completed");
    }

    Ok(response)
}

/// Truncate a query string on a character boundary
fn truncate_query(query: &str) -> String {
    if query.chars().count() <= MAX_QUERY_LENGTH {
        return query.to_string();
    }

    let kept: String = query
        .chars()
        .take(MAX_QUERY_LENGTH - TRUNCATION_SUFFIX.len())
        .collect();
    format!("{kept}{TRUNCATION_SUFFIX}")
}
