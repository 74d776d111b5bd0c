//! Shared fixtures for store integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use debtbook_core::clock::ManualClock;
use debtbook_db::LedgerStore;
use debtbook_shared::AppConfig;
use tempfile::TempDir;

/// A store on a throwaway database file, driven by a manual clock.
pub struct TestStore {
    pub store: LedgerStore,
    pub clock: Arc<ManualClock>,
    pub dir: TempDir,
}

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

pub fn config_in(dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.database.path = dir.path().join("accounting.db");
    config.backup.directory = dir.path().join("backups");
    config
}

pub async fn open_with(config: AppConfig, dir: TempDir) -> TestStore {
    let clock = Arc::new(ManualClock::new(start()));
    let store = LedgerStore::open_with_clock(&config, clock.clone())
        .await
        .expect("store should open");
    TestStore { store, clock, dir }
}

pub async fn open() -> TestStore {
    let dir = TempDir::new().expect("tempdir");
    let config = config_in(&dir);
    open_with(config, dir).await
}

pub async fn open_with_backups(retention_limit: usize, compress_after_days: u32) -> TestStore {
    let dir = TempDir::new().expect("tempdir");
    let mut config = config_in(&dir);
    config.backup.enabled = true;
    config.backup.retention_limit = retention_limit;
    config.backup.compress_after_days = compress_after_days;
    open_with(config, dir).await
}
