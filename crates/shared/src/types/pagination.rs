//! Pagination types for list queries.

use serde::{Deserialize, Serialize};

/// Limit/offset window over an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of items returned.
    pub limit: u64,
    /// Number of items skipped before the first returned one.
    #[serde(default)]
    pub offset: u64,
}

impl PageRequest {
    /// Creates a window of `limit` items starting at `offset`.
    #[must_use]
    pub const fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// Creates a window from a 1-indexed page number.
    #[must_use]
    pub const fn page(page: u64, per_page: u64) -> Self {
        Self {
            limit: per_page,
            offset: page.saturating_sub(1).saturating_mul(per_page),
        }
    }

    /// Returns the window following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset.saturating_add(self.limit),
        }
    }
}
