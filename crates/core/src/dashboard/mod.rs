//! Whole-ledger aggregates.
//!
//! This module provides types for dashboard data:
//! - Ledger-wide totals
//! - Top debtors
//! - Recent activity across all people

pub mod types;

pub use types::*;
