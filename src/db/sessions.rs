// src/db/sessions.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::ServerError;

#[derive(Debug, Clone)]
pub struct SessionRow {
    pub id: i64,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub access_expires_at: i64,
}

#[derive(Debug, Clone)]
pub struct NewSession<'a> {
    pub token_hash: &'a [u8],
    pub access_token: &'a str,
    pub refresh_token: Option<&'a str>,
    pub access_expires_at: i64,
    pub created_at: i64,
    pub expires_at: i64,
}

pub fn insert_session(conn: &Connection, s: &NewSession<'_>) -> Result<i64, ServerError> {
    conn.execute(
        "insert into sessions
            (token_hash, access_token, refresh_token, access_expires_at, created_at, expires_at)
         values (?, ?, ?, ?, ?, ?)",
        params![
            s.token_hash,
            s.access_token,
            s.refresh_token,
            s.access_expires_at,
            s.created_at,
            s.expires_at
        ],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;
    Ok(conn.last_insert_rowid())
}

/// Live session for a cookie token hash: not expired, not revoked.
pub fn find_active_session(
    conn: &Connection,
    token_hash: &[u8],
    now: i64,
) -> Result<Option<SessionRow>, ServerError> {
    conn.query_row(
        "select id, access_token, refresh_token, access_expires_at
         from sessions
         where token_hash = ?
           and expires_at > ?
           and revoked_at is null",
        params![token_hash, now],
        |r| {
            Ok(SessionRow {
                id: r.get(0)?,
                access_token: r.get(1)?,
                refresh_token: r.get(2)?,
                access_expires_at: r.get(3)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

/// Store refreshed tokens. A missing refresh token keeps the old one.
pub fn update_tokens(
    conn: &Connection,
    session_id: i64,
    access_token: &str,
    refresh_token: Option<&str>,
    access_expires_at: i64,
) -> Result<(), ServerError> {
    conn.execute(
        "update sessions
         set access_token = ?,
             refresh_token = coalesce(?, refresh_token),
             access_expires_at = ?
         where id = ?",
        params![access_token, refresh_token, access_expires_at, session_id],
    )
    .map_err(|e| ServerError::DbError(format!("update session tokens failed: {e}")))?;
    Ok(())
}

pub fn revoke_session(conn: &Connection, token_hash: &[u8], now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
        params![now, token_hash],
    )
    .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;
    Ok(())
}
