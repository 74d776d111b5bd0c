//! Backup error types.

use thiserror::Error;

/// Backup operation errors.
#[derive(Debug, Error)]
pub enum BackupError {
    /// Backup target configuration error.
    #[error("backup configuration error: {0}")]
    Configuration(String),

    /// Taking the database snapshot failed.
    #[error("snapshot failed: {0}")]
    Snapshot(String),

    /// Compressing or decompressing a backup failed.
    #[error("compression failed: {0}")]
    Compression(#[from] std::io::Error),

    /// Backup file not found.
    #[error("backup not found: {key}")]
    NotFound {
        /// Storage key that was not found.
        key: String,
    },

    /// OpenDAL operation error.
    #[error("backup storage operation failed: {0}")]
    Operation(String),
}

impl BackupError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a snapshot error.
    #[must_use]
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot(msg.into())
    }
}

impl From<opendal::Error> for BackupError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound {
                key: err.to_string(),
            },
            _ => Self::Operation(err.to_string()),
        }
    }
}
