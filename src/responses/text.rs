use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

/// Rendered itinerary text; both dialects are served as plain text.
pub fn text_response(text: String) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Body::from(text))
        .map_err(|_| ServerError::InternalError)
}
