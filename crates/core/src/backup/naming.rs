//! Backup file naming.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};

/// Extension of a raw snapshot.
pub const SNAPSHOT_EXT: &str = ".db";

/// Extension of a compressed snapshot.
pub const COMPRESSED_EXT: &str = ".db.gz";

const STAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// A backup file found in the backup target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    /// Storage key (file name).
    pub key: String,
    /// When the snapshot was taken, from the file name.
    pub taken_at: DateTime<Utc>,
    /// Whether the file is gzip-compressed.
    pub compressed: bool,
}

/// File name for a snapshot taken at `at`.
#[must_use]
pub fn backup_file_name(prefix: &str, at: DateTime<Utc>) -> String {
    format!(
        "{prefix}-{}-{:06}{SNAPSHOT_EXT}",
        at.format(STAMP_FORMAT),
        at.timestamp_subsec_micros()
    )
}

/// Parses a backup file name produced by [`backup_file_name`].
///
/// Returns `None` for unrelated files.
#[must_use]
pub fn parse_backup_name(prefix: &str, name: &str) -> Option<BackupFile> {
    let rest = name.strip_prefix(prefix)?.strip_prefix('-')?;
    let (stem, compressed) = if let Some(stem) = rest.strip_suffix(COMPRESSED_EXT) {
        (stem, true)
    } else {
        (rest.strip_suffix(SNAPSHOT_EXT)?, false)
    };
    let (stamp, micros) = stem.rsplit_once('-')?;
    if micros.len() != 6 || !micros.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let micros: u32 = micros.parse().ok()?;
    let taken_at = NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT)
        .ok()?
        .with_nanosecond(micros * 1_000)?
        .and_utc();
    Some(BackupFile {
        key: name.to_string(),
        taken_at,
        compressed,
    })
}
