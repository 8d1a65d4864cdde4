// src/db/oauth_states.rs
use rusqlite::{params, Connection};

use crate::errors::ServerError;

/// Insert a pending OAuth state (state_hash should be SHA-256 bytes).
pub fn insert_state(
    conn: &Connection,
    state_hash: &[u8],
    created_at: i64,
    expires_at: i64,
) -> Result<(), ServerError> {
    conn.execute(
        "insert into oauth_states (state_hash, created_at, expires_at) values (?, ?, ?)",
        params![state_hash, created_at, expires_at],
    )
    .map_err(|e| ServerError::DbError(format!("insert oauth state failed: {e}")))?;
    Ok(())
}

/// Mark a state used. Returns false when it is unknown, expired or already used.
pub fn consume_state(conn: &Connection, state_hash: &[u8], now: i64) -> Result<bool, ServerError> {
    let changed = conn
        .execute(
            "update oauth_states
             set used_at = ?
             where state_hash = ?
               and used_at is null
               and expires_at > ?",
            params![now, state_hash, now],
        )
        .map_err(|e| ServerError::DbError(format!("consume oauth state failed: {e}")))?;
    Ok(changed == 1)
}

pub fn purge_expired_states(conn: &Connection, now: i64) -> Result<usize, ServerError> {
    conn.execute("delete from oauth_states where expires_at <= ?", params![now])
        .map_err(|e| ServerError::DbError(format!("purge oauth states failed: {e}")))
}
