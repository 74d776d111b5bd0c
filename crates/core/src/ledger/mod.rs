//! Person and transaction bookkeeping.
//!
//! This module implements the ledger domain:
//! - People and their derived balances
//! - Signed, immutable transactions
//! - Name and description validation
//! - Error types for ledger operations

pub mod error;
pub mod person;
pub mod transaction;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::LedgerError;
pub use person::{BalanceStatus, Person, PersonUsage, sort_by_usage};
pub use transaction::{Transaction, TransactionKind};
pub use validation::{clean_description, clean_name};
