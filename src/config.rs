// src/config.rs
use chrono_tz::Tz;
use std::env;
use std::net::SocketAddr;
use thiserror::Error;

use crate::domain::FormatterConfig;

const DEFAULT_API_URL: &str = "https://api.getjobber.com/api/graphql";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// OAuth client settings for the Jobber developer app.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub authorization_url: String,
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: String,
    pub scope: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub oauth: OAuthConfig,
    pub api_url: String,
    pub api_version: String,
    pub bind_addr: SocketAddr,
    pub database_path: String,
    pub schema_path: String,
    pub timezone: Tz,
    pub map_locality: String,
    pub secure_cookies: bool,
    pub max_workers: usize,
}

impl AppConfig {
    /// Read configuration from the environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let optional = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let oauth = OAuthConfig {
            authorization_url: required("JOBBER_AUTHORIZATION_URL")?,
            token_url: required("JOBBER_TOKEN_URL")?,
            client_id: required("JOBBER_CLIENT_ID")?,
            client_secret: required("JOBBER_CLIENT_SECRET")?,
            callback_url: required("JOBBER_CALLBACK_URL")?,
            scope: optional("JOBBER_SCOPE", ""),
        };

        let bind = optional("QUICKLIST_BIND", "127.0.0.1:3000");
        let bind_addr = bind.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            name: "QUICKLIST_BIND",
            value: bind.clone(),
            reason: e.to_string(),
        })?;

        let tz_name = optional("QUICKLIST_TIMEZONE", "America/Los_Angeles");
        let timezone = tz_name.parse::<Tz>().map_err(|e| ConfigError::Invalid {
            name: "QUICKLIST_TIMEZONE",
            value: tz_name.clone(),
            reason: e.to_string(),
        })?;

        let workers = optional("QUICKLIST_WORKERS", "8");
        let max_workers = workers
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ConfigError::Invalid {
                name: "QUICKLIST_WORKERS",
                value: workers.clone(),
                reason: "expected a positive integer".to_string(),
            })?;

        Ok(Self {
            oauth,
            api_url: optional("JOBBER_API_URL", DEFAULT_API_URL),
            api_version: required("JOBBER_API_VERSION")?,
            bind_addr,
            database_path: optional("QUICKLIST_DB", "quicklist.sqlite3"),
            schema_path: optional("QUICKLIST_SCHEMA", "sql/schema.sql"),
            timezone,
            map_locality: optional("QUICKLIST_MAP_LOCALITY", "Spokane,WA"),
            secure_cookies: matches!(
                optional("QUICKLIST_SECURE_COOKIES", "false").to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            ),
            max_workers,
        })
    }

    pub fn formatter_config(&self) -> FormatterConfig {
        FormatterConfig {
            timezone: self.timezone,
            map_locality: self.map_locality.clone(),
        }
    }
}
