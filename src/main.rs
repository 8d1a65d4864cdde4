use crate::config::AppConfig;
use crate::db::init_db;
use crate::jobber::JobberClient;
use crate::state::AppState;
use astra::Server;
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod jobber;
mod query;
mod responses;
mod router;
mod state;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quicklist=info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };

    let jobber = match JobberClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "could not build Jobber client");
            std::process::exit(1);
        }
    };

    let addr = config.bind_addr;
    let workers = config.max_workers;
    let schema_path = config.schema_path.clone();
    let state = AppState::new(config, Box::new(jobber));

    if let Err(e) = init_db(&state.db, &schema_path) {
        tracing::error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    tracing::info!(%addr, workers, "starting QuickList at http://{addr}");

    let server = Server::bind(&addr).max_workers(workers);
    let result = server.serve(move |req, _info| router::serve(req, &state));

    match result {
        Ok(()) => tracing::info!("server shut down cleanly"),
        Err(e) => tracing::error!(error = %e, "server ended with error"),
    }
}
