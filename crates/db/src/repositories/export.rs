//! Export repository: transactions joined with owner names.

use debtbook_core::export::ExportFilter;
use debtbook_core::ledger::TransactionKind;
use sea_orm::{DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement, Value};

use super::dashboard::ActivityRow;

/// Export repository for bulk transaction reads.
#[derive(Debug, Clone)]
pub struct ExportRepository {
    db: DatabaseConnection,
}

impl ExportRepository {
    /// Creates a new export repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Transactions passing `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn rows(&self, filter: &ExportFilter) -> Result<Vec<ActivityRow>, DbErr> {
        if filter.is_vacuous() {
            return Ok(Vec::new());
        }
        ActivityRow::find_by_statement(export_statement(filter))
            .all(&self.db)
            .await
    }
}

/// Builds the export query for `filter`.
#[must_use]
pub fn export_statement(filter: &ExportFilter) -> Statement {
    let mut sql = String::from(
        "SELECT t.id, t.person_id, p.name AS person_name, t.amount, t.description, t.created_at \
         FROM transactions t JOIN people p ON p.id = t.person_id",
    );
    let mut conditions: Vec<String> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    match filter.kind {
        Some(TransactionKind::Debt) => conditions.push("t.amount >= 0".to_string()),
        Some(TransactionKind::Payment) => conditions.push("t.amount < 0".to_string()),
        None => {}
    }

    if let Some(ids) = &filter.person_ids {
        let placeholders = vec!["?"; ids.len()].join(", ");
        conditions.push(format!("t.person_id IN ({placeholders})"));
        values.extend(ids.iter().map(|id| Value::from(id.into_inner())));
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY t.created_at DESC, t.id DESC");

    Statement::from_sql_and_values(DbBackend::Sqlite, sql, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use debtbook_shared::types::PersonId;

    #[test]
    fn test_export_statement_unfiltered() {
        let stmt = export_statement(&ExportFilter::all());
        assert!(!stmt.sql.contains("WHERE"));
        assert!(stmt.sql.ends_with("ORDER BY t.created_at DESC, t.id DESC"));
    }

    #[test]
    fn test_export_statement_filtered() {
        let filter = ExportFilter::all()
            .with_kind(TransactionKind::Payment)
            .with_people([PersonId::new(4), PersonId::new(9)]);
        let stmt = export_statement(&filter);
        assert!(stmt.sql.contains("WHERE t.amount < 0 AND t.person_id IN (?, ?)"));
        assert_eq!(
            stmt.values.unwrap().0,
            vec![Value::from(4_i64), Value::from(9_i64)]
        );
    }
}
