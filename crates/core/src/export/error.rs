//! Export error types.

use thiserror::Error;

/// Errors raised while rendering an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Underlying writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
}
