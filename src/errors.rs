// errors.rs
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, bad parameters, etc.) or downstream layers (DB, config).
///
/// A hotel being filtered out of a listing is *not* an error, see
/// `domain::hotel::Assembly`.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Database Error: {0}")]
    DbError(String),

    /// A stored metadata value that cannot be read as the type it stands for.
    #[error("Malformed metadata: {owner} has {key} = {value:?}")]
    MalformedMeta {
        owner: String,
        key: &'static str,
        value: String,
    },

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::DbError(_)
            | ServerError::MalformedMeta { .. }
            | ServerError::ConfigError(_)
            | ServerError::Io(_)
            | ServerError::InternalError => 500,
        }
    }
}
