use crate::errors::ServerError;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

/// Turn a handler error into a response: JSON `{"error": ...}` for API
/// callers, an HTML page otherwise. Server-side failures are logged here.
pub fn error_response(err: ServerError, wants_json: bool) -> Response {
    let status = err.status();
    if status >= 500 {
        tracing::error!(status, error = %err, "request failed");
    } else {
        tracing::debug!(status, error = %err, "request rejected");
    }

    let message = err.public_message();
    let (content_type, body) = if wants_json {
        ("application/json", json!({ "error": message }).to_string())
    } else {
        ("text/html; charset=utf-8", error_page(status, &message).into_string())
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", content_type)
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
