// src/state.rs
use crate::config::AppConfig;
use crate::db::Database;
use crate::domain::Formatter;
use crate::jobber::JobberApi;

/// Everything a request handler needs, shared by all astra workers.
pub struct AppState {
    pub db: Database,
    pub config: AppConfig,
    pub formatter: Formatter,
    pub jobber: Box<dyn JobberApi>,
}

impl AppState {
    pub fn new(config: AppConfig, jobber: Box<dyn JobberApi>) -> Self {
        Self {
            db: Database::new(config.database_path.clone()),
            formatter: Formatter::new(config.formatter_config()),
            config,
            jobber,
        }
    }
}
