pub mod connection;
pub mod oauth_states;
pub mod sessions;

pub use connection::{init_db, Database};
