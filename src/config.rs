// config.rs
use crate::errors::ServerError;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_DATABASE_PATH: &str = "hotels.sqlite3";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_MAX_WORKERS: usize = 8;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    /// SQL file executed at every startup, after the schema. It must be safe
    /// to run more than once.
    pub seed_path: Option<PathBuf>,
    pub log_level: String,
}

impl AppConfig {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self, ServerError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_path: get("DATABASE_PATH")
                .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string())
                .into(),
            bind_addr: parse_var("BIND_ADDR", get("BIND_ADDR"), DEFAULT_BIND_ADDR)?,
            max_workers: match get("MAX_WORKERS") {
                Some(raw) => parse_value("MAX_WORKERS", &raw)?,
                None => DEFAULT_MAX_WORKERS,
            },
            seed_path: get("SEED_PATH").map(PathBuf::from),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}

fn parse_var<T: FromStr>(key: &str, raw: Option<String>, default: &str) -> Result<T, ServerError> {
    parse_value(key, raw.as_deref().unwrap_or(default))
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ServerError> {
    raw.trim()
        .parse()
        .map_err(|_| ServerError::ConfigError(format!("{key} has an invalid value: {raw:?}")))
}
