//! Error types for store operations.
//!
//! `set` deliberately stays outside this taxonomy: invalid input is reported
//! as `false`, never as an error.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by [`Store`](crate::Store) operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The key is absent or its TTL has elapsed
    #[error("There is no such key in values: {0}")]
    KeyNotFound(String),

    /// `load` was called before any snapshot was written
    #[error("No snapshot found at {}", .0.display())]
    SnapshotNotFound(PathBuf),

    /// The snapshot file could not be created, written or read
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot line is not a valid record
    #[error("Malformed snapshot at line {line}: {source}")]
    MalformedSnapshot {
        /// 1-based line number in the snapshot file
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be serialized during `dump`
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl StoreError {
    /// Returns `true` for both a missing key and a missing snapshot.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::KeyNotFound(_) | StoreError::SnapshotNotFound(_))
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
