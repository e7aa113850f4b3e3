//! Single write connection behind `tokio::sync::Mutex`.

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::Mutex;

use anshin_core::errors::AnshinResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// Open and configure a raw writer connection. Migrations run on it before
/// it is wrapped in a [`WriteConnection`].
pub fn open_writer(path: &Path, busy_timeout_ms: u32) -> AnshinResult<Connection> {
    let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
    apply_pragmas(&conn, busy_timeout_ms)?;
    Ok(conn)
}

pub fn open_writer_in_memory() -> AnshinResult<Connection> {
    let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn)
}

/// A single write connection protected by an async mutex.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Acquire the write lock and execute a closure with the connection.
    pub async fn with_conn<F, T>(&self, f: F) -> AnshinResult<T>
    where
        F: FnOnce(&Connection) -> AnshinResult<T>,
    {
        let guard = self.conn.lock().await;
        f(&guard)
    }
}
