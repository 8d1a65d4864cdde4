pub mod cookies;
pub mod oauth;
pub mod sessions;
pub mod token;

pub use cookies::{clear_session_cookie, session_cookie, session_token};
pub use sessions::ActiveSession;
