//! Backup service implementation using Apache OpenDAL.

use std::io::{Read, Write};

use chrono::{DateTime, Utc};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use opendal::{Operator, services};

use super::config::{BackupConfig, BackupProvider};
use super::error::BackupError;
use super::naming::{BackupFile, COMPRESSED_EXT, SNAPSHOT_EXT, backup_file_name, parse_backup_name};

/// Outcome of one backup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReport {
    /// Key of the snapshot written by this run.
    pub snapshot: String,
    /// Snapshots compressed by this run.
    pub compressed: Vec<String>,
    /// Files deleted by retention.
    pub pruned: Vec<String>,
}

/// Writes, compresses and prunes database snapshots.
#[derive(Debug, Clone)]
pub struct BackupService {
    operator: Operator,
    config: BackupConfig,
}

impl BackupService {
    /// Create a new backup service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the backup target cannot be initialized.
    pub fn from_config(config: BackupConfig) -> Result<Self, BackupError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    fn create_operator(provider: &BackupProvider) -> Result<Operator, BackupError> {
        let operator = match provider {
            BackupProvider::LocalFs { root } => {
                let root = root
                    .to_str()
                    .ok_or_else(|| BackupError::configuration("backup directory is not valid UTF-8"))?;
                Operator::new(services::Fs::default().root(root))
                    .map_err(|e| BackupError::configuration(e.to_string()))?
                    .finish()
            }
            BackupProvider::S3 {
                endpoint,
                bucket,
                root,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .root(root)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);
                Operator::new(builder)
                    .map_err(|e| BackupError::configuration(e.to_string()))?
                    .finish()
            }
        };
        Ok(operator)
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &BackupConfig {
        &self.config
    }

    /// Writes a snapshot taken at `taken_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn store_snapshot(
        &self,
        bytes: Vec<u8>,
        taken_at: DateTime<Utc>,
    ) -> Result<BackupFile, BackupError> {
        let key = backup_file_name(&self.config.file_prefix, taken_at);
        let size = bytes.len();
        self.operator.write(&key, bytes).await?;
        tracing::info!(key = %key, size, "Stored database backup");
        Ok(BackupFile {
            key,
            taken_at,
            compressed: false,
        })
    }

    /// Lists backup files, oldest first. Unrelated files are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if listing fails.
    pub async fn list_backups(&self) -> Result<Vec<BackupFile>, BackupError> {
        let entries = self.operator.list("/").await?;
        let mut files: Vec<BackupFile> = entries
            .iter()
            .filter(|entry| entry.metadata().is_file())
            .filter_map(|entry| parse_backup_name(&self.config.file_prefix, entry.name()))
            .collect();
        files.sort_by(|a, b| a.taken_at.cmp(&b.taken_at).then_with(|| a.key.cmp(&b.key)));
        Ok(files)
    }

    /// Compresses uncompressed backups older than the configured age.
    ///
    /// Returns the keys of the compressed files.
    ///
    /// # Errors
    ///
    /// Returns an error if reading, compressing or writing fails.
    pub async fn compress_stale(&self, now: DateTime<Utc>) -> Result<Vec<String>, BackupError> {
        let mut compressed = Vec::new();
        for file in self.list_backups().await? {
            if file.compressed || now - file.taken_at <= self.config.compress_after {
                continue;
            }
            let raw = self.operator.read(&file.key).await?.to_vec();
            let gz = gzip(raw).await?;
            let target = compressed_key(&file.key);
            self.operator.write(&target, gz).await?;
            self.operator.delete(&file.key).await?;
            tracing::info!(from = %file.key, to = %target, "Compressed stale backup");
            compressed.push(target);
        }
        Ok(compressed)
    }

    /// Deletes the oldest backups beyond the retention limit.
    ///
    /// Returns the keys of the deleted files.
    ///
    /// # Errors
    ///
    /// Returns an error if listing or deleting fails.
    pub async fn prune(&self) -> Result<Vec<String>, BackupError> {
        let files = self.list_backups().await?;
        let excess = files.len().saturating_sub(self.config.retention_limit);
        let mut pruned = Vec::with_capacity(excess);
        for file in files.into_iter().take(excess) {
            self.operator.delete(&file.key).await?;
            tracing::info!(key = %file.key, "Pruned old backup");
            pruned.push(file.key);
        }
        Ok(pruned)
    }

    /// Stores a snapshot, then compresses and prunes.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error.
    pub async fn run(
        &self,
        snapshot: Vec<u8>,
        taken_at: DateTime<Utc>,
    ) -> Result<BackupReport, BackupError> {
        let stored = self.store_snapshot(snapshot, taken_at).await?;
        let compressed = self.compress_stale(taken_at).await?;
        let pruned = self.prune().await?;
        Ok(BackupReport {
            snapshot: stored.key,
            compressed,
            pruned,
        })
    }

    /// Reads a backup, decompressing it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be decompressed.
    pub async fn read_backup(&self, file: &BackupFile) -> Result<Vec<u8>, BackupError> {
        let bytes = self.operator.read(&file.key).await?.to_vec();
        if file.compressed {
            gunzip(bytes).await
        } else {
            Ok(bytes)
        }
    }
}

fn compressed_key(key: &str) -> String {
    let stem = key.strip_suffix(SNAPSHOT_EXT).unwrap_or(key);
    format!("{stem}{COMPRESSED_EXT}")
}

async fn gzip(raw: Vec<u8>) -> Result<Vec<u8>, BackupError> {
    tokio::task::spawn_blocking(move || {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&raw)?;
        encoder.finish()
    })
    .await
    .map_err(|e| BackupError::Operation(e.to_string()))?
    .map_err(BackupError::from)
}

async fn gunzip(compressed: Vec<u8>) -> Result<Vec<u8>, BackupError> {
    tokio::task::spawn_blocking(move || {
        let mut out = Vec::new();
        GzDecoder::new(compressed.as_slice()).read_to_end(&mut out)?;
        Ok::<_, std::io::Error>(out)
    })
    .await
    .map_err(|e| BackupError::Operation(e.to_string()))?
    .map_err(BackupError::from)
}
