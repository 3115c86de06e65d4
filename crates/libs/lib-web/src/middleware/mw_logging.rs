//! # Request Logging Middleware
//!
//! One log line when a request arrives and one when the response leaves,
//! correlated by request id. Request bodies are never logged; the login
//! and user endpoints carry credentials.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{error, info, warn};

use super::mw_req_stamp::RequestStamp;

/// Endpoints whose query strings are not logged.
const SENSITIVE_ENDPOINTS: &[&str] = &["/api/auth/login", "/api/auth/refresh", "/api/users"];

/// Log the request line on the way in and status plus latency on the way
/// out.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);

    let stamp = req.extensions().get::<RequestStamp>().cloned();
    let request_id = stamp
        .as_ref()
        .map(|s| s.id.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let sensitive = SENSITIVE_ENDPOINTS.iter().any(|e| path.starts_with(e));
    match (&query, sensitive) {
        (Some(q), false) => info!("[REQ {}] {} {}?{}", request_id, method, path, q),
        _ => info!("[REQ {}] {} {}", request_id, method, path),
    }

    let res = next.run(req).await;

    let status = res.status();
    let elapsed_ms = stamp.map(|s| s.time_in.elapsed().as_millis()).unwrap_or(0);

    if status.is_server_error() {
        error!(
            "[RES {}] {} {} -> {} ({}ms)",
            request_id, method, path, status, elapsed_ms
        );
    } else if status.is_client_error() {
        warn!(
            "[RES {}] {} {} -> {} ({}ms)",
            request_id, method, path, status, elapsed_ms
        );
    } else {
        info!(
            "[RES {}] {} {} -> {} ({}ms)",
            request_id, method, path, status, elapsed_ms
        );
    }

    res
}
