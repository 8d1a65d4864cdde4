// src/auth/oauth.rs
use rusqlite::Connection;
use url::Url;

use crate::auth::token::{generate_token_default, hash_token};
use crate::config::OAuthConfig;
use crate::db::oauth_states;
use crate::errors::ServerError;

/// How long an issued state stays redeemable.
pub const STATE_TTL_SECS: i64 = 10 * 60;

/// Issue a fresh state, keeping only its hash. Expired states are swept first.
pub fn issue_state(conn: &Connection, now: i64) -> Result<String, ServerError> {
    oauth_states::purge_expired_states(conn, now)?;
    let state = generate_token_default();
    oauth_states::insert_state(conn, &hash_token(&state), now, now + STATE_TTL_SECS)?;
    Ok(state)
}

/// Single use: a second call with the same state returns false.
pub fn consume_state(conn: &Connection, state: &str, now: i64) -> Result<bool, ServerError> {
    if state.is_empty() {
        return Ok(false);
    }
    oauth_states::consume_state(conn, &hash_token(state), now)
}

pub fn authorize_url(cfg: &OAuthConfig, state: &str) -> Result<String, ServerError> {
    let mut url = Url::parse(&cfg.authorization_url).map_err(|e| {
        tracing::error!(error = %e, "authorization url is invalid");
        ServerError::InternalError
    })?;
    url.query_pairs_mut()
        .append_pair("client_id", &cfg.client_id)
        .append_pair("redirect_uri", &cfg.callback_url)
        .append_pair("scope", &cfg.scope)
        .append_pair("response_type", "code")
        .append_pair("state", state);
    Ok(url.into())
}
