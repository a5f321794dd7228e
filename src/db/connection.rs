use parking_lot::Mutex;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::errors::ServerError;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Handle to the hotel database.
///
/// Opened once by the caller and handed to whoever needs it. Clones share the
/// same underlying connection; access is serialized by the mutex.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
        info!(path = %path.display(), "database opened");
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self, ServerError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Provides the connection to the closure. Must not be nested.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        let mut conn = self.conn.lock();
        f(&mut conn)
    }
}

/// Create the tables if they don't exist yet.
pub fn init_db(db: &Database) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))
    })?;

    info!("database schema ready");
    Ok(())
}

/// Run a SQL seed file against the database
pub fn seed_db(db: &Database, seed_path: &Path) -> Result<(), ServerError> {
    let seed_sql = fs::read_to_string(seed_path)
        .map_err(|e| ServerError::DbError(format!("Failed to read seed file: {e}")))?;

    db.with_conn(|conn| {
        conn.execute_batch(&seed_sql)
            .map_err(|e| ServerError::DbError(format!("Failed to apply seed: {e}")))
    })?;

    info!(path = %seed_path.display(), "database seeded");
    Ok(())
}
