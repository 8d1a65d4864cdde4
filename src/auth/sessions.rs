// src/auth/sessions.rs
use rusqlite::Connection;

use crate::auth::token::{generate_token_default, hash_token};
use crate::db::connection::Database;
use crate::db::sessions::{self as db_sessions, NewSession};
use crate::errors::ServerError;
use crate::jobber::{JobberApi, TokenGrant};

pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 30;
/// Used when the token endpoint omits `expires_in`.
pub const DEFAULT_ACCESS_TTL_SECS: i64 = 3600;

/// A signed-in browser with a usable Jobber access token.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub id: i64,
    pub access_token: String,
}

fn access_expiry(grant: &TokenGrant, now: i64) -> i64 {
    now + grant.expires_in.filter(|s| *s > 0).unwrap_or(DEFAULT_ACCESS_TTL_SECS)
}

/// Store the grant behind a new random session token; returns the raw token for the cookie.
pub fn create_session(conn: &Connection, grant: &TokenGrant, now: i64) -> Result<String, ServerError> {
    let raw_token = generate_token_default();
    let hash = hash_token(&raw_token);

    db_sessions::insert_session(
        conn,
        &NewSession {
            token_hash: &hash,
            access_token: &grant.access_token,
            refresh_token: grant.refresh_token.as_deref(),
            access_expires_at: access_expiry(grant, now),
            created_at: now,
            expires_at: now + SESSION_TTL_SECS,
        },
    )?;

    Ok(raw_token)
}

/// Look up the session behind a cookie token, refreshing an expired access
/// token when a refresh token is on file. A failed refresh reads as signed out.
pub fn resolve_session(
    db: &Database,
    jobber: &dyn JobberApi,
    raw_token: &str,
    now: i64,
) -> Result<Option<ActiveSession>, ServerError> {
    let hash = hash_token(raw_token);
    let Some(row) = db.with_conn(|conn| db_sessions::find_active_session(conn, &hash, now))? else {
        return Ok(None);
    };

    if row.access_expires_at > now {
        return Ok(Some(ActiveSession {
            id: row.id,
            access_token: row.access_token,
        }));
    }

    let Some(refresh_token) = row.refresh_token.as_deref() else {
        tracing::info!(session = row.id, "access token expired without refresh token");
        return Ok(None);
    };

    // The upstream call happens outside the connection borrow.
    let grant = match jobber.refresh(refresh_token) {
        Ok(grant) => grant,
        Err(e) => {
            tracing::warn!(session = row.id, error = %e, "token refresh failed");
            return Ok(None);
        }
    };

    db.with_conn(|conn| {
        db_sessions::update_tokens(
            conn,
            row.id,
            &grant.access_token,
            grant.refresh_token.as_deref(),
            access_expiry(&grant, now),
        )
    })?;
    tracing::info!(session = row.id, "access token refreshed");

    Ok(Some(ActiveSession {
        id: row.id,
        access_token: grant.access_token,
    }))
}

pub fn end_session(conn: &Connection, raw_token: &str, now: i64) -> Result<(), ServerError> {
    db_sessions::revoke_session(conn, &hash_token(raw_token), now)
}
