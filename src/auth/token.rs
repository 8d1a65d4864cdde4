// src/auth/token.rs
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

pub const DEFAULT_TOKEN_BYTES: usize = 32;

/// Secure random token from the OS RNG. Used for OAuth states and session cookies.
pub fn generate_token_default() -> String {
    let mut rng = OsRng;
    generate_token(&mut rng, DEFAULT_TOKEN_BYTES)
}

/// URL-safe base64 (no padding) of `nbytes` random bytes.
pub fn generate_token<R: RngCore>(rng: &mut R, nbytes: usize) -> String {
    let mut buf = vec![0u8; nbytes];
    rng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buf)
}

/// SHA-256 of a token. Only this goes into the database.
pub fn hash_token(token: &str) -> [u8; 32] {
    let out = Sha256::digest(token.as_bytes());
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
