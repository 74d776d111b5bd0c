//! SQLite ledger store with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//! - [`LedgerStore`], the serialized command/query API over all of the above

pub mod background;
mod convert;
pub mod entities;
pub mod migration;
pub mod repositories;
pub mod snapshot;
pub mod store;

pub use background::BackgroundTasks;
pub use store::LedgerStore;

use std::time::Duration;

use debtbook_shared::config::DatabaseConfig;
use sea_orm::{DatabaseConnection, DbErr, RuntimeErr, SqlxSqliteConnector};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

/// Connection options shared by the store and the migrator.
#[must_use]
pub fn connect_options(config: &DatabaseConfig) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .pragma("temp_store", "MEMORY")
}

/// Establishes a connection to the database.
///
/// The pool holds a single connection; callers serialize access on top.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options(config))
        .await
        .map_err(|e| DbErr::Conn(RuntimeErr::Internal(e.to_string())))?;
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}
