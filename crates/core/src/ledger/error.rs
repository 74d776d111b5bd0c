//! Ledger error types for validation and storage errors.

use debtbook_shared::AppError;
use debtbook_shared::types::PersonId;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Person name is empty after trimming.
    #[error("Name cannot be empty")]
    InvalidName,

    /// A person with exactly this name already exists.
    #[error("A person named '{0}' already exists")]
    DuplicateName(String),

    // ========== Not Found ==========
    /// The person targeted by a mutation does not exist.
    #[error("Person not found: {0}")]
    PersonNotFound(PersonId),

    // ========== Storage Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Returns the error code reported to collaborators.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidName => "INVALID_NAME",
            Self::DuplicateName(_) => "DUPLICATE_NAME",
            Self::PersonNotFound(_) => "PERSON_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns true for errors caused by caller input rather than storage faults.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidName | Self::DuplicateName(_))
    }

    /// Returns true when retrying the same call may succeed.
    ///
    /// Only storage faults caused by SQLite lock contention qualify.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Database(msg) => {
                let msg = msg.to_ascii_lowercase();
                msg.contains("database is locked") || msg.contains("sqlite_busy")
            }
            _ => false,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidName => Self::Validation(err.to_string()),
            LedgerError::DuplicateName(_) => Self::Conflict(err.to_string()),
            LedgerError::PersonNotFound(_) => Self::NotFound(err.to_string()),
            LedgerError::Database(msg) => Self::Database(msg),
        }
    }
}
