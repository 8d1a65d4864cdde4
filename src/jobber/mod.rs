pub mod client;
pub mod jobber_error;

pub use client::{JobberClient, TokenGrant};
pub use jobber_error::JobberError;

use serde_json::Value;

/// The upstream calls the web layer depends on.
pub trait JobberApi: Send + Sync {
    fn fetch_visits(&self, access_token: &str, start: &str, end: &str) -> Result<Value, JobberError>;
    fn exchange_code(&self, code: &str) -> Result<TokenGrant, JobberError>;
    fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, JobberError>;
}

impl JobberApi for JobberClient {
    fn fetch_visits(&self, access_token: &str, start: &str, end: &str) -> Result<Value, JobberError> {
        JobberClient::fetch_visits(self, access_token, start, end)
    }

    fn exchange_code(&self, code: &str) -> Result<TokenGrant, JobberError> {
        JobberClient::exchange_code(self, code)
    }

    fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, JobberError> {
        JobberClient::refresh(self, refresh_token)
    }
}
