// src/auth/cookies.rs
use astra::Request;

use crate::auth::sessions::SESSION_TTL_SECS;

pub const SESSION_COOKIE: &str = "session";

pub fn session_cookie(token: &str, secure: bool) -> String {
    cookie_header(token, SESSION_TTL_SECS, secure)
}

pub fn clear_session_cookie(secure: bool) -> String {
    cookie_header("", 0, secure)
}

fn cookie_header(value: &str, max_age: i64, secure: bool) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE}={value}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// The session token from any `Cookie` header on the request.
pub fn session_token(req: &Request) -> Option<String> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
