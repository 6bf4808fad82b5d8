//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

/// Header carrying a caller-supplied correlation id.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Logs method, matched route, status, and duration for every request.
///
/// A caller-supplied `x-request-id` is logged and echoed on the response so
/// lock, confirm, and release calls can be correlated with server logs.
/// Rejected reservations (409) are logged at `warn`.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let request_id: Option<HeaderValue> = request.headers().get(&REQUEST_ID_HEADER).cloned();
    let start = Instant::now();

    let mut response = next.run(request).await;

    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    let status = response.status();
    let id = request_id
        .as_ref()
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    if status == StatusCode::CONFLICT {
        warn!(
            request_id = id,
            method = %method,
            route = %route,
            status = status.as_u16(),
            duration_ms,
            "Reservation rejected"
        );
    } else {
        info!(
            request_id = id,
            method = %method,
            route = %route,
            status = status.as_u16(),
            duration_ms,
            "HTTP request"
        );
    }

    if let Some(value) = request_id {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
