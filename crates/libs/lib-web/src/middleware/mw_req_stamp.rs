//! # Request Stamp Middleware
//!
//! Assigns each request a unique id used to correlate log lines, and
//! echoes it back in the `x-request-id` response header.

use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Per-request metadata stored in the request extensions.
#[derive(Clone, Debug)]
pub struct RequestStamp {
    /// Unique request id (UUID v4).
    pub id: String,
    /// When the request entered the middleware stack.
    pub time_in: Instant,
}

/// Stamp the request with an id and arrival time.
///
/// Must sit outside [`log_requests`](super::log_requests) in the layer
/// stack so the stamp is present when logging runs.
pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp {
        id: Uuid::new_v4().to_string(),
        time_in: Instant::now(),
    };
    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&stamp.id) {
        res.headers_mut().insert("x-request-id", value);
    }

    res
}
