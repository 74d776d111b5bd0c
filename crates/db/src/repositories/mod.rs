//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod dashboard;
pub mod export;
pub mod person;
pub mod search;
pub mod settings;
pub mod transaction;

pub use dashboard::{ActivityRow, DashboardRepository, DebtorRow, TotalsRow};
pub use export::ExportRepository;
pub use person::{PersonRepository, PersonUsageRow};
pub use search::{PersonBalanceRow, SearchRepository};
pub use settings::{DEFAULT_LANGUAGE, SettingsRepository};
pub use transaction::TransactionRepository;
