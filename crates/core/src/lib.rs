//! Core business logic for Debtbook.
//!
//! This crate contains pure business logic with ZERO database dependencies.
//! All domain types, validation rules, search scoring and report shapes
//! live here; the `debtbook-db` crate feeds them with rows.
//!
//! # Modules
//!
//! - `ledger` - People, signed transactions and balances
//! - `search` - Query parsing, fuzzy ranking and suggestions
//! - `dashboard` - Whole-ledger aggregates
//! - `export` - Transaction export rendering
//! - `backup` - Snapshot storage, compression and retention
//! - `clock` - Injectable time source

pub mod backup;
pub mod clock;
pub mod dashboard;
pub mod export;
pub mod ledger;
pub mod search;
