//! Database backups using Apache OpenDAL.
//!
//! Snapshots are written as `{prefix}-{YYYYmmdd-HHMMSS-ffffff}.db`. Older
//! snapshots are gzip-compressed in place and the oldest files are pruned
//! once the retention limit is exceeded. Supported targets:
//! - Local filesystem (default)
//! - S3-compatible object storage
//!
//! # Lifecycle
//!
//! ```text
//! snapshot bytes ──► store_snapshot ──► compress_stale ──► prune
//!                    (*.db)             (*.db -> *.db.gz)  (oldest first)
//! ```

mod config;
mod error;
mod naming;
mod service;

pub use config::{BackupConfig, BackupProvider};
pub use error::BackupError;
pub use naming::{BackupFile, backup_file_name, parse_backup_name};
pub use service::{BackupReport, BackupService};
