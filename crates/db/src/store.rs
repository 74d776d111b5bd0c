//! The ledger store: serialized access to people, transactions and reports.
//!
//! Every operation holds the store's async mutex for its whole duration, so
//! operations on one store never interleave. After each successful mutation
//! a backup job is spawned when backups are enabled.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use debtbook_core::backup::{BackupConfig, BackupService};
use debtbook_core::clock::{Clock, SystemClock};
use debtbook_core::dashboard::{DashboardSummary, DashboardTotals};
use debtbook_core::export::{ExportFilter, ExportRow};
use debtbook_core::ledger::{
    LedgerError, Person, PersonUsage, Transaction, clean_description, clean_name, sort_by_usage,
};
use debtbook_core::search::{
    Candidate, SearchResponse, comparison_text, fetch_limit, parse_query, rank, should_suggest,
    suggest,
};
use debtbook_core::search::suggest::SUGGESTION_POOL_SIZE;
use debtbook_shared::AppConfig;
use debtbook_shared::types::{Amount, PageRequest, PersonId, TransactionId, UserId};
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use sea_orm_migration::MigratorTrait;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::background::BackgroundTasks;
use crate::migration::Migrator;
use crate::repositories::{
    DEFAULT_LANGUAGE, DashboardRepository, ExportRepository, PersonRepository, SearchRepository,
    SettingsRepository, TransactionRepository,
};
use crate::snapshot::snapshot_database;

/// Logs a storage fault and converts it to the ledger error surface.
fn storage_error(operation: &'static str) -> impl FnOnce(DbErr) -> LedgerError {
    move |err| {
        error!(operation, error = %err, "Storage fault");
        LedgerError::Database(err.to_string())
    }
}

/// Serialized command/query API over one SQLite database.
#[derive(Debug)]
pub struct LedgerStore {
    db: DatabaseConnection,
    people: PersonRepository,
    transactions: TransactionRepository,
    search: SearchRepository,
    dashboard: DashboardRepository,
    export: ExportRepository,
    settings: SettingsRepository,
    lock: Mutex<()>,
    clock: Arc<dyn Clock>,
    default_limit: usize,
    backups: Option<Arc<BackupRunner>>,
    tasks: BackgroundTasks,
}

impl LedgerStore {
    /// Opens (creating if needed) the configured database with the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] if connecting, migrating or setting
    /// up the backup target fails.
    pub async fn open(config: &AppConfig) -> Result<Self, LedgerError> {
        Self::open_with_clock(config, Arc::new(SystemClock::new())).await
    }

    /// Opens the configured database with an explicit clock.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] if connecting, migrating or setting
    /// up the backup target fails.
    pub async fn open_with_clock(
        config: &AppConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, LedgerError> {
        let db = crate::connect(&config.database)
            .await
            .map_err(storage_error("connect"))?;
        Migrator::up(&db, None)
            .await
            .map_err(storage_error("migrate"))?;

        let backups = if config.backup.enabled {
            let service = BackupService::from_config(BackupConfig::from_settings(&config.backup))
                .map_err(|e| LedgerError::Database(e.to_string()))?;
            Some(Arc::new(BackupRunner {
                service,
                db_path: config.database.path.clone(),
                busy_timeout: Duration::from_millis(config.database.busy_timeout_ms),
                clock: Arc::clone(&clock),
                serial: Mutex::new(()),
            }))
        } else {
            None
        };

        info!(
            path = %config.database.path.display(),
            backups = backups
                .as_ref()
                .map_or("disabled", |runner| runner.service.config().provider.name()),
            "Opened ledger store"
        );

        Ok(Self {
            people: PersonRepository::new(db.clone()),
            transactions: TransactionRepository::new(db.clone()),
            search: SearchRepository::new(db.clone()),
            dashboard: DashboardRepository::new(db.clone()),
            export: ExportRepository::new(db.clone()),
            settings: SettingsRepository::new(db.clone()),
            db,
            lock: Mutex::new(()),
            clock,
            default_limit: config.search.default_limit,
            backups,
            tasks: BackgroundTasks::new(),
        })
    }

    // ========================================================================
    // People
    // ========================================================================

    /// Adds a person with a trimmed, unique name.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidName`] when the name is blank
    /// - [`LedgerError::DuplicateName`] when the exact name exists
    pub async fn add_person(&self, name: &str) -> Result<Person, LedgerError> {
        let name = clean_name(name)?;
        let person: Person = {
            let _guard = self.lock.lock().await;
            if self
                .people
                .find_by_name(&name)
                .await
                .map_err(storage_error("add_person"))?
                .is_some()
            {
                return Err(LedgerError::DuplicateName(name));
            }
            self.people
                .create(&name, self.clock.now())
                .await
                .map_err(|err| match err.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => {
                        LedgerError::DuplicateName(name.clone())
                    }
                    _ => storage_error("add_person")(err),
                })?
                .into()
        };
        info!(person_id = %person.id, name = %person.name, "Added person");
        self.schedule_backup();
        Ok(person)
    }

    /// Looks a person up by id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] on storage faults.
    pub async fn get_person(&self, id: PersonId) -> Result<Option<Person>, LedgerError> {
        let _guard = self.lock.lock().await;
        let model = self
            .people
            .find_by_id(id.into_inner())
            .await
            .map_err(storage_error("get_person"))?;
        Ok(model.map(Person::from))
    }

    /// Renames a person.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidName`] when the name is blank
    /// - [`LedgerError::DuplicateName`] when another person has the name
    /// - [`LedgerError::PersonNotFound`] when `id` does not exist
    pub async fn rename_person(&self, id: PersonId, new_name: &str) -> Result<Person, LedgerError> {
        let name = clean_name(new_name)?;
        let person: Person = {
            let _guard = self.lock.lock().await;
            let exists = self
                .people
                .find_by_id(id.into_inner())
                .await
                .map_err(storage_error("rename_person"))?
                .is_some();
            if !exists {
                return Err(LedgerError::PersonNotFound(id));
            }
            let taken = self
                .people
                .find_by_name(&name)
                .await
                .map_err(storage_error("rename_person"))?
                .is_some_and(|other| other.id != id.into_inner());
            if taken {
                return Err(LedgerError::DuplicateName(name));
            }
            let updated = self
                .people
                .rename(id.into_inner(), &name)
                .await
                .map_err(|err| match err.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => {
                        LedgerError::DuplicateName(name.clone())
                    }
                    _ => storage_error("rename_person")(err),
                })?;
            if !updated {
                return Err(LedgerError::PersonNotFound(id));
            }
            self.people
                .find_by_id(id.into_inner())
                .await
                .map_err(storage_error("rename_person"))?
                .ok_or(LedgerError::PersonNotFound(id))?
                .into()
        };
        info!(person_id = %person.id, name = %person.name, "Renamed person");
        self.schedule_backup();
        Ok(person)
    }

    /// Deletes a person and all their transactions. Deleting a missing id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] on storage faults.
    pub async fn delete_person(&self, id: PersonId) -> Result<(), LedgerError> {
        let deleted = {
            let _guard = self.lock.lock().await;
            self.people
                .delete(id.into_inner())
                .await
                .map_err(storage_error("delete_person"))?
        };
        if deleted > 0 {
            info!(person_id = %id, "Deleted person");
            self.schedule_backup();
        }
        Ok(())
    }

    /// Lists people, newest first, optionally windowed.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] on storage faults.
    pub async fn list_people(
        &self,
        limit: Option<u64>,
        offset: u64,
    ) -> Result<Vec<Person>, LedgerError> {
        let page = match (limit, offset) {
            (None, 0) => None,
            (limit, offset) => Some(PageRequest::new(
                limit.unwrap_or(u64::MAX).min(i64::MAX.unsigned_abs()),
                offset.min(i64::MAX.unsigned_abs()),
            )),
        };
        let _guard = self.lock.lock().await;
        let models = self
            .people
            .list(page)
            .await
            .map_err(storage_error("list_people"))?;
        Ok(models.into_iter().map(Person::from).collect())
    }

    /// Every person with transaction count and balance, most used first.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] on storage faults.
    pub async fn list_people_with_usage(&self) -> Result<Vec<PersonUsage>, LedgerError> {
        let rows = {
            let _guard = self.lock.lock().await;
            self.people
                .list_with_usage()
                .await
                .map_err(storage_error("list_people_with_usage"))?
        };
        let mut usage: Vec<PersonUsage> = rows.into_iter().map(PersonUsage::from).collect();
        sort_by_usage(&mut usage);
        Ok(usage)
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    /// Records a signed amount against a person.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PersonNotFound`] when `person_id` does not exist.
    pub async fn add_transaction(
        &self,
        person_id: PersonId,
        amount: Amount,
        description: &str,
    ) -> Result<Transaction, LedgerError> {
        let description = clean_description(description);
        let transaction: Transaction = {
            let _guard = self.lock.lock().await;
            if self
                .people
                .find_by_id(person_id.into_inner())
                .await
                .map_err(storage_error("add_transaction"))?
                .is_none()
            {
                return Err(LedgerError::PersonNotFound(person_id));
            }
            self.transactions
                .create(
                    person_id.into_inner(),
                    amount.minor(),
                    &description,
                    self.clock.now(),
                )
                .await
                .map_err(|err| match err.sql_err() {
                    Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                        LedgerError::PersonNotFound(person_id)
                    }
                    _ => storage_error("add_transaction")(err),
                })?
                .into()
        };
        info!(
            transaction_id = %transaction.id,
            person_id = %person_id,
            amount = %transaction.amount,
            kind = %transaction.kind(),
            "Added transaction"
        );
        self.schedule_backup();
        Ok(transaction)
    }

    /// Looks a transaction up by id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] on storage faults.
    pub async fn get_transaction(
        &self,
        id: TransactionId,
    ) -> Result<Option<Transaction>, LedgerError> {
        let _guard = self.lock.lock().await;
        let model = self
            .transactions
            .find_by_id(id.into_inner())
            .await
            .map_err(storage_error("get_transaction"))?;
        Ok(model.map(Transaction::from))
    }

    /// A person's balance; zero for unknown people and people without transactions.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] on storage faults.
    pub async fn get_balance(&self, person_id: PersonId) -> Result<Amount, LedgerError> {
        let _guard = self.lock.lock().await;
        let minor = self
            .transactions
            .balance(person_id.into_inner())
            .await
            .map_err(storage_error("get_balance"))?;
        Ok(Amount::from_minor(minor))
    }

    /// A person's transactions, newest first, within optional inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] on storage faults.
    pub async fn get_history(
        &self,
        person_id: PersonId,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let _guard = self.lock.lock().await;
        let models = self
            .transactions
            .history(person_id.into_inner(), start, end)
            .await
            .map_err(storage_error("get_history"))?;
        Ok(models.into_iter().map(Transaction::from).collect())
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Fuzzy person search. `None` uses the configured default limit.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] on storage faults. No results is not an error.
    pub async fn search_people(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<SearchResponse, LedgerError> {
        let query = query.trim();
        let limit = limit.unwrap_or(self.default_limit);
        let parsed = parse_query(query);
        let fetch = fetch_limit(u64::try_from(limit).unwrap_or(u64::MAX));

        let _guard = self.lock.lock().await;
        let rows = self
            .search
            .candidates(&parsed, fetch)
            .await
            .map_err(storage_error("search_people"))?;
        let fetched = rows.len();
        let candidates: Vec<Candidate> = rows.into_iter().map(Candidate::from).collect();
        let matches = rank(candidates, query, &parsed, limit);

        let suggestions = if should_suggest(&matches, &parsed) {
            let pool = self
                .people
                .recent_names(SUGGESTION_POOL_SIZE)
                .await
                .map_err(storage_error("search_people"))?;
            suggest(pool, &comparison_text(query, &parsed))
        } else {
            Vec::new()
        };

        debug!(
            query,
            ids = parsed.ids.len(),
            keywords = parsed.keywords.len(),
            balance_filter = parsed.balance.is_some(),
            fetched,
            matches = matches.len(),
            suggestions = suggestions.len(),
            "Searched people"
        );

        Ok(SearchResponse {
            query: query.to_string(),
            matches,
            suggestions,
        })
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    /// Transactions passing `filter`, newest first, with owner names.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] on storage faults.
    pub async fn export_transactions(
        &self,
        filter: &ExportFilter,
    ) -> Result<Vec<ExportRow>, LedgerError> {
        let _guard = self.lock.lock().await;
        let rows = self
            .export
            .rows(filter)
            .await
            .map_err(storage_error("export_transactions"))?;
        Ok(rows.into_iter().map(ExportRow::from).collect())
    }

    /// Totals, the `top_n` largest debtors and the `recent_n` newest transactions.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] on storage faults.
    pub async fn get_dashboard_summary(
        &self,
        top_n: u64,
        recent_n: u64,
    ) -> Result<DashboardSummary, LedgerError> {
        let _guard = self.lock.lock().await;
        let totals = self
            .dashboard
            .totals()
            .await
            .map_err(storage_error("get_dashboard_summary"))?;
        let top_debtors = self
            .dashboard
            .top_debtors(top_n)
            .await
            .map_err(storage_error("get_dashboard_summary"))?;
        let recent = self
            .dashboard
            .recent_activity(recent_n)
            .await
            .map_err(storage_error("get_dashboard_summary"))?;
        Ok(DashboardSummary {
            totals: DashboardTotals::from_sums(
                Amount::from_minor(totals.total_debt),
                Amount::from_minor(totals.total_payments),
            ),
            top_debtors: top_debtors.into_iter().map(Into::into).collect(),
            recent_activity: recent.into_iter().map(Into::into).collect(),
        })
    }

    /// Sum of all positive amounts.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] on storage faults.
    pub async fn total_debt(&self) -> Result<Amount, LedgerError> {
        let _guard = self.lock.lock().await;
        let totals = self
            .dashboard
            .totals()
            .await
            .map_err(storage_error("total_debt"))?;
        Ok(Amount::from_minor(totals.total_debt))
    }

    /// Sum of all negative amounts (zero or negative).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] on storage faults.
    pub async fn total_payments(&self) -> Result<Amount, LedgerError> {
        let _guard = self.lock.lock().await;
        let totals = self
            .dashboard
            .totals()
            .await
            .map_err(storage_error("total_payments"))?;
        Ok(Amount::from_minor(totals.total_payments))
    }

    // ========================================================================
    // User settings
    // ========================================================================

    /// A user's language, `"en"` when never set.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] on storage faults.
    pub async fn get_user_language(&self, user_id: UserId) -> Result<String, LedgerError> {
        let _guard = self.lock.lock().await;
        let language = self
            .settings
            .language(user_id.into_inner())
            .await
            .map_err(storage_error("get_user_language"))?;
        Ok(language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()))
    }

    /// Stores a user's language.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] on storage faults.
    pub async fn set_user_language(&self, user_id: UserId, language: &str) -> Result<(), LedgerError> {
        let language = language.trim();
        {
            let _guard = self.lock.lock().await;
            self.settings
                .set_language(user_id.into_inner(), language, self.clock.now())
                .await
                .map_err(storage_error("set_user_language"))?;
        }
        info!(user_id = %user_id, language, "Updated user language");
        Ok(())
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Waits for every spawned background job to finish.
    pub async fn wait_for_pending(&self) {
        self.tasks.wait_all().await;
    }

    /// Waits for background jobs, then closes the connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] if closing fails.
    pub async fn close(self) -> Result<(), LedgerError> {
        self.tasks.wait_all().await;
        self.db.close().await.map_err(storage_error("close"))
    }

    fn schedule_backup(&self) {
        if let Some(runner) = &self.backups {
            let runner = Arc::clone(runner);
            self.tasks.spawn(async move { runner.run().await });
        }
    }
}

/// Takes and stores one backup at a time.
#[derive(Debug)]
struct BackupRunner {
    service: BackupService,
    db_path: PathBuf,
    busy_timeout: Duration,
    clock: Arc<dyn Clock>,
    serial: Mutex<()>,
}

impl BackupRunner {
    async fn run(&self) {
        let _serial = self.serial.lock().await;
        let outcome = match snapshot_database(&self.db_path, self.busy_timeout).await {
            Ok(bytes) => self.service.run(bytes, self.clock.now()).await,
            Err(err) => Err(err),
        };
        match outcome {
            Ok(report) => info!(
                snapshot = %report.snapshot,
                compressed = report.compressed.len(),
                pruned = report.pruned.len(),
                "Backup completed"
            ),
            Err(err) => error!(error = %err, path = %self.db_path.display(), "Backup failed"),
        }
    }
}
