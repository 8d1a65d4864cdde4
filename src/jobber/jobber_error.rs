use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobberError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Jobber answered {status}: {body}")]
    Api { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(String),
    #[error("Client setup failed: {0}")]
    Config(String),
}

impl From<reqwest::Error> for JobberError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            JobberError::Json(err.to_string())
        } else {
            JobberError::Network(err.to_string())
        }
    }
}
