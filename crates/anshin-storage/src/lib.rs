//! # anshin-storage
//!
//! SQLite implementation of [`CollectionStore`](anshin_core::traits::CollectionStore):
//! one async-mutex write connection, a small read pool for file-backed
//! databases, and versioned schema migrations.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use anshin_core::errors::{AnshinError, StorageError};

/// Convert any SQLite or serialization failure into a storage error.
pub fn to_storage_err(message: String) -> AnshinError {
    StorageError::SqliteError { message }.into()
}
