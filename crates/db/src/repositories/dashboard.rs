//! Dashboard repository for whole-ledger aggregates.

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement, Value};

/// Signed totals over every transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromQueryResult)]
pub struct TotalsRow {
    /// Sum of positive amounts.
    pub total_debt: i64,
    /// Sum of negative amounts.
    pub total_payments: i64,
}

/// A person with a positive balance.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct DebtorRow {
    /// Person id.
    pub id: i64,
    /// Person name.
    pub name: String,
    /// Balance in minor units.
    pub balance: i64,
}

/// A transaction joined with its owner's name.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct ActivityRow {
    /// Transaction id.
    pub id: i64,
    /// Owner id.
    pub person_id: i64,
    /// Owner name.
    pub person_name: String,
    /// Signed amount in minor units.
    pub amount: i64,
    /// Description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

const TOTALS_SQL: &str = r"
SELECT
    COALESCE(SUM(CASE WHEN amount > 0 THEN amount END), 0) AS total_debt,
    COALESCE(SUM(CASE WHEN amount < 0 THEN amount END), 0) AS total_payments
FROM transactions
";

const TOP_DEBTORS_SQL: &str = r"
SELECT p.id, p.name, COALESCE(SUM(t.amount), 0) AS balance
FROM people p
LEFT JOIN transactions t ON t.person_id = p.id
GROUP BY p.id
HAVING balance > 0
ORDER BY balance DESC, p.name ASC
LIMIT ?
";

const RECENT_ACTIVITY_SQL: &str = r"
SELECT t.id, t.person_id, p.name AS person_name, t.amount, t.description, t.created_at
FROM transactions t
JOIN people p ON p.id = t.person_id
ORDER BY t.created_at DESC, t.id DESC
LIMIT ?
";

/// Dashboard repository for aggregate queries.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sums of positive and negative amounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn totals(&self) -> Result<TotalsRow, DbErr> {
        let row = TotalsRow::find_by_statement(Statement::from_string(DbBackend::Sqlite, TOTALS_SQL))
            .one(&self.db)
            .await?;
        Ok(row.unwrap_or_default())
    }

    /// The `limit` largest positive balances.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn top_debtors(&self, limit: u64) -> Result<Vec<DebtorRow>, DbErr> {
        DebtorRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            TOP_DEBTORS_SQL,
            [Value::from(sql_limit(limit))],
        ))
        .all(&self.db)
        .await
    }

    /// The `limit` newest transactions across all people.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn recent_activity(&self, limit: u64) -> Result<Vec<ActivityRow>, DbErr> {
        ActivityRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            RECENT_ACTIVITY_SQL,
            [Value::from(sql_limit(limit))],
        ))
        .all(&self.db)
        .await
    }
}

/// SQLite takes a signed limit.
pub(crate) fn sql_limit(limit: u64) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}
