use crate::config::AppConfig;
use crate::db::{init_db, seed_db, Database};
use crate::errors::ServerError;
use crate::responses::error_to_response;
use crate::router::handle;
use astra::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod db;
mod domain;
mod errors;
mod responses;
mod router;
mod templates;
mod timers;

#[cfg(test)]
mod tests;

fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    if let Err(e) = run(config) {
        error!(error = %e, "server stopped");
        std::process::exit(1);
    }

    info!("Server shut down cleanly.");
}

fn run(config: AppConfig) -> Result<(), ServerError> {
    // 1️⃣ Open the database and make sure the tables exist
    let db = Database::open(&config.database_path)?;
    init_db(&db)?;
    if let Some(seed_path) = &config.seed_path {
        seed_db(&db, seed_path)?;
    }

    // 2️⃣ Start the server
    info!(addr = %config.bind_addr, workers = config.max_workers, "Starting server");
    let server = Server::bind(&config.bind_addr).max_workers(config.max_workers);

    // 3️⃣ Serve requests, passing db handle into closure
    server
        .serve(move |req, _info| match handle(req, &db) {
            Ok(resp) => resp,
            Err(err) => error_to_response(err),
        })
        .map_err(ServerError::from)
}
