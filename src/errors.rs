// errors.rs
use astra::Response;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, auth, bad input) or downstream layers (DB, Jobber).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Upstream Error: {0}")]
    Upstream(String),
    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Unauthorized(_) => 401,
            ServerError::DbError(_) | ServerError::Upstream(_) | ServerError::InternalError => 500,
        }
    }

    /// Message safe to show to the client. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ServerError::NotFound => "Not Found".to_string(),
            ServerError::BadRequest(msg) | ServerError::Unauthorized(msg) => msg.clone(),
            ServerError::DbError(_) | ServerError::InternalError => "Internal Server Error".to_string(),
            ServerError::Upstream(msg) => msg.clone(),
        }
    }
}
