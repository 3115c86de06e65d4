//! # Root Handlers
//!
//! Landing endpoints and the liveness probe.

use axum::response::Html;
use axum::Json;

use lib_core::dto::users::Message;

/// `GET /` - plain JSON greeting.
pub async fn read_root() -> Json<Message> {
    Json(Message {
        message: "Hello World!".to_string(),
    })
}

/// `GET /hello` - the same greeting as an HTML page.
pub async fn hello_page() -> Html<&'static str> {
    Html(
        r#"<html>
  <head>
    <title>taskzero</title>
  </head>
  <body>
    <h1>Hello World!</h1>
  </body>
</html>"#,
    )
}

/// `GET /health` - liveness probe.
///
/// Reachable only after migrations have applied and the socket is open,
/// so a 200 here means the service is fully started.
pub async fn health() -> &'static str {
    "OK"
}
