//! Input validation for ledger mutations.

use super::error::LedgerError;

/// Trims a person name and rejects empty results.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidName`] when nothing but whitespace remains.
pub fn clean_name(raw: &str) -> Result<String, LedgerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidName);
    }
    Ok(trimmed.to_string())
}

/// Trims a transaction description. Empty descriptions are allowed.
#[must_use]
pub fn clean_description(raw: &str) -> String {
    raw.trim().to_string()
}
