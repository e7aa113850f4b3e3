//! Versioned schema migrations tracked with `PRAGMA user_version`.

mod v001_collection_tables;
mod v002_reference_tables;

use rusqlite::Connection;

use anshin_core::errors::{AnshinResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> AnshinResult<()>;

const MIGRATIONS: [(u32, Migration); 2] = [
    (1, v001_collection_tables::migrate),
    (2, v002_reference_tables::migrate),
];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 2;

pub fn current_version(conn: &Connection) -> AnshinResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply every migration newer than the database's current version, each
/// in its own transaction.
pub fn run_migrations(conn: &Connection) -> AnshinResult<u32> {
    let current = current_version(conn)?;
    let mut applied = 0;
    for (version, migrate) in MIGRATIONS {
        if version <= current {
            continue;
        }
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| to_storage_err(format!("migration {version} begin: {e}")))?;
        migrate(&tx).map_err(|e| StorageError::MigrationFailed {
            version,
            reason: e.to_string(),
        })?;
        tx.pragma_update(None, "user_version", version)
            .map_err(|e| to_storage_err(e.to_string()))?;
        tx.commit()
            .map_err(|e| to_storage_err(format!("migration {version} commit: {e}")))?;
        applied += 1;
        tracing::debug!(version, "applied migration");
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrates_fresh_database_to_latest() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_migrations(&conn).unwrap(), LATEST_VERSION);
        assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
    }

    #[test]
    fn rerun_is_a_no_op() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(run_migrations(&conn).unwrap(), 0);
    }
}
