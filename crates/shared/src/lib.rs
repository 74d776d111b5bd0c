//! Shared types, errors, and configuration for Debtbook.
//!
//! This crate provides common types used across all other crates:
//! - Signed amounts stored as integer minor units
//! - Typed IDs for type-safe entity references
//! - Pagination types for list queries
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
