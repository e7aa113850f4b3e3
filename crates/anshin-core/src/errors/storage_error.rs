/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("job not found: {job_id}")]
    JobNotFound { job_id: String },

    #[error("job {job_id} is already {status}")]
    JobAlreadyFinished { job_id: String, status: String },

    #[error("corrupt row in {table}: {reason}")]
    CorruptRow { table: String, reason: String },
}
