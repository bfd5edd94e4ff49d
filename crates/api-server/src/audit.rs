//! Request/response audit logging
//!
//! One line per request and one per response, keyed by the caller's
//! `X-Request-Id`, so calls can be correlated across services.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

pub async fn audit_log(request: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = request
        .headers()
        .get("X-Request-Id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().unwrap_or("").to_string();

    tracing::info!(
        "Request {} - Method: {}, Path: {}, QueryParams: {}",
        request_id,
        method,
        path,
        query
    );

    let response = next.run(request).await;

    tracing::info!(
        "Response - Status: {}, Time Taken: {}ms",
        response.status(),
        start.elapsed().as_millis()
    );

    response
}
