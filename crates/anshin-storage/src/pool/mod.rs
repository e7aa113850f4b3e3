//! Connection pool managing the writer and the readers.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use anshin_core::errors::AnshinResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

use crate::migrations;

/// The single writer plus, for file-backed databases, a read pool.
///
/// In-memory databases have no read pool: each in-memory connection is
/// its own database, so reads go through the writer.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: Option<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open the database file, migrate it, then open the readers.
    pub fn open(path: &Path, read_pool_size: usize, busy_timeout_ms: u32) -> AnshinResult<Self> {
        let conn = write_connection::open_writer(path, busy_timeout_ms)?;
        migrations::run_migrations(&conn)?;
        let readers = ReadPool::open(path, read_pool_size, busy_timeout_ms)?;
        Ok(Self {
            writer: WriteConnection::new(conn),
            readers: Some(readers),
            db_path: Some(path.to_path_buf()),
        })
    }

    pub fn open_in_memory() -> AnshinResult<Self> {
        let conn = write_connection::open_writer_in_memory()?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            writer: WriteConnection::new(conn),
            readers: None,
            db_path: None,
        })
    }
}
