//! Backup configuration types.

use std::path::PathBuf;

use chrono::Duration;
use debtbook_shared::config::BackupSettings;
use serde::{Deserialize, Serialize};

/// Where backup files are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackupProvider {
    /// Local filesystem directory.
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// S3-compatible storage: Cloudflare R2, AWS S3, MinIO
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// Key prefix inside the bucket.
        root: String,
        /// AWS access key ID.
        access_key_id: String,
        /// AWS secret access key.
        secret_access_key: String,
        /// AWS region.
        region: String,
    },
}

impl BackupProvider {
    /// Create local filesystem provider.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Create S3-compatible provider.
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        root: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            root: root.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LocalFs { .. } => "local",
            Self::S3 { .. } => "s3",
        }
    }
}

/// Backup service configuration.
#[derive(Debug, Clone)]
pub struct BackupConfig {
    /// Backup target.
    pub provider: BackupProvider,
    /// File name prefix.
    pub file_prefix: String,
    /// Uncompressed backups older than this are compressed.
    pub compress_after: Duration,
    /// Maximum number of backup files kept.
    pub retention_limit: usize,
}

impl BackupConfig {
    /// Default file prefix.
    pub const DEFAULT_PREFIX: &'static str = "accounting";
    /// Default compression age in days.
    pub const DEFAULT_COMPRESS_AFTER_DAYS: u32 = 7;
    /// Default number of files kept.
    pub const DEFAULT_RETENTION_LIMIT: usize = 30;

    /// Create a config with default settings.
    #[must_use]
    pub fn new(provider: BackupProvider) -> Self {
        Self {
            provider,
            file_prefix: Self::DEFAULT_PREFIX.to_string(),
            compress_after: Duration::days(i64::from(Self::DEFAULT_COMPRESS_AFTER_DAYS)),
            retention_limit: Self::DEFAULT_RETENTION_LIMIT,
        }
    }

    /// Build a config from application settings. An `s3` section selects the
    /// bucket; otherwise backups land in the local `directory`.
    #[must_use]
    pub fn from_settings(settings: &BackupSettings) -> Self {
        let provider = match &settings.s3 {
            Some(s3) => BackupProvider::s3(
                &s3.endpoint,
                &s3.bucket,
                &s3.root,
                &s3.access_key_id,
                &s3.secret_access_key,
                &s3.region,
            ),
            None => BackupProvider::local_fs(&settings.directory),
        };
        Self::new(provider)
            .with_file_prefix(settings.file_prefix.clone())
            .with_compress_after_days(settings.compress_after_days)
            .with_retention_limit(settings.retention_limit)
    }

    /// Set the file prefix.
    #[must_use]
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Set the compression age in days.
    #[must_use]
    pub fn with_compress_after_days(mut self, days: u32) -> Self {
        self.compress_after = Duration::days(i64::from(days));
        self
    }

    /// Set the retention limit.
    #[must_use]
    pub fn with_retention_limit(mut self, limit: usize) -> Self {
        self.retention_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debtbook_shared::config::S3Settings;

    #[test]
    fn test_backup_config_defaults() {
        let config = BackupConfig::new(BackupProvider::local_fs("./backups"));
        assert_eq!(config.file_prefix, "accounting");
        assert_eq!(config.compress_after, Duration::days(7));
        assert_eq!(config.retention_limit, 30);
        assert_eq!(config.provider.name(), "local");
    }

    #[test]
    fn test_from_settings() {
        let settings = BackupSettings {
            enabled: true,
            directory: PathBuf::from("/tmp/b"),
            compress_after_days: 1,
            retention_limit: 2,
            file_prefix: "ledger".to_string(),
            s3: None,
        };
        let config = BackupConfig::from_settings(&settings);
        assert_eq!(config.file_prefix, "ledger");
        assert_eq!(config.compress_after, Duration::days(1));
        assert_eq!(config.retention_limit, 2);
        assert!(matches!(config.provider, BackupProvider::LocalFs { ref root } if root == &PathBuf::from("/tmp/b")));
    }

    #[test]
    fn test_from_settings_with_s3_section() {
        let settings = BackupSettings {
            s3: Some(S3Settings {
                endpoint: "https://r2.example.com".to_string(),
                bucket: "backups".to_string(),
                root: "ledger/".to_string(),
                access_key_id: "k".to_string(),
                secret_access_key: "s".to_string(),
                region: "auto".to_string(),
            }),
            ..BackupSettings::default()
        };
        let config = BackupConfig::from_settings(&settings);
        assert_eq!(config.provider.name(), "s3");
        match config.provider {
            BackupProvider::S3 { endpoint, bucket, root, region, .. } => {
                assert_eq!(endpoint, "https://r2.example.com");
                assert_eq!(bucket, "backups");
                assert_eq!(root, "ledger/");
                assert_eq!(region, "auto");
            }
            BackupProvider::LocalFs { .. } => panic!("expected the s3 provider"),
        }
    }
}
