// src/jobber/client.rs
use chrono_tz::Tz;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::{AppConfig, OAuthConfig};
use crate::jobber::JobberError;

const USER_AGENT: &str = concat!("quicklist/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const VISITS_QUERY: &str = r#"
query VisitsByDateRange($start: ISO8601DateTime!, $end: ISO8601DateTime!) {
  visits(
    filter: { startAt: { after: $start, before: $end } }
    sort: { key: START_AT, direction: ASCENDING }
    timezone: "__TIMEZONE__"
  ) {
    edges {
      node {
        id
        title
        startAt
        endAt
        job {
          jobType
          jobberWebUri
          total
          salesperson { name { first last } }
        }
      }
    }
  }
}
"#;

/// Token endpoint answer for both the code exchange and the refresh grant.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Blocking client for the Jobber GraphQL API and its OAuth token endpoint.
pub struct JobberClient {
    client: Client,
    api_url: String,
    api_version: String,
    timezone: Tz,
    oauth: OAuthConfig,
}

impl JobberClient {
    pub fn new(cfg: &AppConfig) -> Result<Self, JobberError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| JobberError::Config(e.to_string()))?;

        Ok(Self {
            client,
            api_url: cfg.api_url.clone(),
            api_version: cfg.api_version.clone(),
            timezone: cfg.timezone,
            oauth: cfg.oauth.clone(),
        })
    }

    /// Run `VisitsByDateRange` and hand back the upstream JSON untouched.
    pub fn fetch_visits(&self, access_token: &str, start: &str, end: &str) -> Result<Value, JobberError> {
        let body = visits_request_body(start, end, self.timezone);

        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(access_token)
            .header("X-JOBBER-GRAPHQL-VERSION", self.api_version.as_str())
            .json(&body)
            .send()?;

        let resp = ensure_success(resp)?;
        resp.json::<Value>().map_err(|e| JobberError::Json(e.to_string()))
    }

    pub fn exchange_code(&self, code: &str) -> Result<TokenGrant, JobberError> {
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.oauth.callback_url.as_str()),
            ("client_id", self.oauth.client_id.as_str()),
            ("client_secret", self.oauth.client_secret.as_str()),
        ])
    }

    pub fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, JobberError> {
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.oauth.client_id.as_str()),
            ("client_secret", self.oauth.client_secret.as_str()),
        ])
    }

    fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenGrant, JobberError> {
        let resp = self.client.post(&self.oauth.token_url).form(form).send()?;
        let resp = ensure_success(resp)?;
        resp.json::<TokenGrant>()
            .map_err(|e| JobberError::Json(e.to_string()))
    }
}

fn ensure_success(resp: Response) -> Result<Response, JobberError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(JobberError::Api {
        status: status.as_u16(),
        body,
    })
}

pub(crate) fn visits_request_body(start: &str, end: &str, timezone: Tz) -> Value {
    json!({
        "query": VISITS_QUERY.replace("__TIMEZONE__", timezone.name()),
        "variables": { "start": start, "end": end },
    })
}
