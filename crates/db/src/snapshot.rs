//! Consistent copies of the live database.

use std::path::Path;
use std::time::Duration;

use debtbook_core::backup::BackupError;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};

/// Copies the database at `path` with `VACUUM INTO` and returns the bytes.
///
/// Uses its own read-only connection, so it never contends with the store's
/// pool beyond SQLite's own locking.
///
/// # Errors
///
/// Returns [`BackupError::Snapshot`] if the copy cannot be made or read.
pub async fn snapshot_database(path: &Path, busy_timeout: Duration) -> Result<Vec<u8>, BackupError> {
    let scratch = tempfile::tempdir().map_err(|e| BackupError::snapshot(e.to_string()))?;
    let target = scratch.path().join("snapshot.db");
    let target_str = target
        .to_str()
        .ok_or_else(|| BackupError::snapshot("scratch path is not valid UTF-8"))?
        .to_string();

    let mut conn = SqliteConnectOptions::new()
        .filename(path)
        .read_only(true)
        .busy_timeout(busy_timeout)
        .connect()
        .await
        .map_err(|e| BackupError::snapshot(e.to_string()))?;

    let copied = sqlx::query("VACUUM INTO ?")
        .bind(target_str)
        .execute(&mut conn)
        .await;
    let closed = conn.close().await;
    copied.map_err(|e| BackupError::snapshot(e.to_string()))?;
    closed.map_err(|e| BackupError::snapshot(e.to_string()))?;

    tokio::fs::read(&target)
        .await
        .map_err(|e| BackupError::snapshot(e.to_string()))
}
