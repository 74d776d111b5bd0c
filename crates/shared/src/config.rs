//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Backup configuration.
    #[serde(default)]
    pub backup: BackupSettings,
    /// Search configuration.
    #[serde(default)]
    pub search: SearchConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
    /// How long a statement waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("accounting.db")
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

/// Backup configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BackupSettings {
    /// Whether a backup is taken after every mutation.
    #[serde(default)]
    pub enabled: bool,
    /// Directory the local filesystem provider writes into.
    #[serde(default = "default_backup_directory")]
    pub directory: PathBuf,
    /// Uncompressed backups older than this are gzip-compressed.
    #[serde(default = "default_compress_after_days")]
    pub compress_after_days: u32,
    /// Maximum number of backup files kept.
    #[serde(default = "default_retention_limit")]
    pub retention_limit: usize,
    /// File name prefix for backup files.
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// S3-compatible target. When set, backups go to the bucket instead of `directory`.
    #[serde(default)]
    pub s3: Option<S3Settings>,
}

/// S3-compatible object storage settings (AWS S3, Cloudflare R2, MinIO).
#[derive(Debug, Clone, Deserialize)]
pub struct S3Settings {
    /// Endpoint URL.
    pub endpoint: String,
    /// Bucket name.
    pub bucket: String,
    /// Key prefix inside the bucket.
    #[serde(default)]
    pub root: String,
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Region; R2 accepts `auto`.
    #[serde(default = "default_s3_region")]
    pub region: String,
}

fn default_s3_region() -> String {
    "auto".to_string()
}

fn default_backup_directory() -> PathBuf {
    PathBuf::from("Database_Backups")
}

fn default_compress_after_days() -> u32 {
    7
}

fn default_retention_limit() -> usize {
    30
}

fn default_file_prefix() -> String {
    "accounting".to_string()
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: default_backup_directory(),
            compress_after_days: default_compress_after_days(),
            retention_limit: default_retention_limit(),
            file_prefix: default_file_prefix(),
            s3: None,
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Number of matches returned when the caller does not ask for a limit.
    #[serde(default = "default_search_limit")]
    pub default_limit: usize,
    /// Number of matches a result screen usually shows.
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
}

fn default_search_limit() -> usize {
    25
}

fn default_display_limit() -> usize {
    5
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_search_limit(),
            display_limit: default_display_limit(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `DEBTBOOK__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("DEBTBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.database.path, PathBuf::from("accounting.db"));
        assert_eq!(config.database.busy_timeout_ms, 5000);
        assert!(!config.backup.enabled);
        assert_eq!(config.backup.directory, PathBuf::from("Database_Backups"));
        assert_eq!(config.backup.retention_limit, 30);
        assert!(config.backup.s3.is_none());
        assert_eq!(config.search.default_limit, 25);
        assert_eq!(config.search.display_limit, 5);
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("DEBTBOOK__DATABASE__PATH", Some("/tmp/ledger.db")),
                ("DEBTBOOK__BACKUP__FILE_PREFIX", Some("ledger")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.path, PathBuf::from("/tmp/ledger.db"));
                assert_eq!(config.backup.file_prefix, "ledger");
                assert_eq!(config.database.busy_timeout_ms, 5000);
            },
        );
    }

    #[test]
    fn test_load_s3_backup_target_from_environment() {
        temp_env::with_vars(
            [
                ("DEBTBOOK__BACKUP__S3__ENDPOINT", Some("https://r2.example.com")),
                ("DEBTBOOK__BACKUP__S3__BUCKET", Some("debtbook")),
                ("DEBTBOOK__BACKUP__S3__ACCESS_KEY_ID", Some("key")),
                ("DEBTBOOK__BACKUP__S3__SECRET_ACCESS_KEY", Some("secret")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                let s3 = config.backup.s3.expect("s3 section");
                assert_eq!(s3.endpoint, "https://r2.example.com");
                assert_eq!(s3.bucket, "debtbook");
                assert_eq!(s3.access_key_id, "key");
                assert_eq!(s3.secret_access_key, "secret");
                assert_eq!(s3.root, "");
                assert_eq!(s3.region, "auto");
            },
        );
    }
}
