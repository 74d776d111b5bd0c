//! Candidate fetch for person search.
//!
//! Filtering happens in SQL; scoring and ordering of the fetched rows is
//! done by `debtbook_core::search::ranking`.

use chrono::{DateTime, Utc};
use debtbook_core::search::ParsedQuery;
use sea_orm::{DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement, Value};

/// A person row with its aggregated balance.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct PersonBalanceRow {
    /// Person id.
    pub id: i64,
    /// Person name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Sum of amounts in minor units.
    pub balance: i64,
}

/// Search repository for candidate queries.
#[derive(Debug, Clone)]
pub struct SearchRepository {
    db: DatabaseConnection,
}

impl SearchRepository {
    /// Creates a new search repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches up to `fetch_limit` people matching every filter of `parsed`.
    ///
    /// Rows come back by absolute balance descending, then name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn candidates(
        &self,
        parsed: &ParsedQuery,
        fetch_limit: u64,
    ) -> Result<Vec<PersonBalanceRow>, DbErr> {
        PersonBalanceRow::find_by_statement(candidate_statement(parsed, fetch_limit))
            .all(&self.db)
            .await
    }
}

/// Builds the candidate query for `parsed`.
#[must_use]
pub fn candidate_statement(parsed: &ParsedQuery, fetch_limit: u64) -> Statement {
    let mut sql = String::from(
        "SELECT p.id, p.name, p.created_at, COALESCE(SUM(t.amount), 0) AS balance \
         FROM people p LEFT JOIN transactions t ON t.person_id = p.id",
    );
    let mut values: Vec<Value> = Vec::new();
    let mut conditions: Vec<String> = Vec::new();

    if !parsed.ids.is_empty() {
        let placeholders = vec!["?"; parsed.ids.len()].join(", ");
        conditions.push(format!("p.id IN ({placeholders})"));
        values.extend(parsed.ids.iter().map(|id| Value::from(id.into_inner())));
    }

    for keyword in &parsed.keywords {
        conditions.push("LOWER(p.name) LIKE ? ESCAPE '\\'".to_string());
        values.push(Value::from(format!("%{}%", escape_like(keyword))));
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    sql.push_str(" GROUP BY p.id");

    if let Some(predicate) = parsed.balance {
        sql.push_str(" HAVING balance ");
        sql.push_str(predicate.op.as_sql());
        sql.push_str(" ?");
        values.push(Value::from(predicate.operand.minor()));
    }

    sql.push_str(" ORDER BY ABS(balance) DESC, p.name ASC LIMIT ?");
    values.push(Value::from(i64::try_from(fetch_limit).unwrap_or(i64::MAX)));

    Statement::from_sql_and_values(DbBackend::Sqlite, sql, values)
}

/// Escapes `LIKE` wildcards so keywords match literally.
#[must_use]
pub fn escape_like(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use debtbook_core::search::parse_query;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("ali"), "ali");
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    #[test]
    fn test_statement_without_filters() {
        let stmt = candidate_statement(&parse_query(""), 50);
        assert!(!stmt.sql.contains("WHERE"));
        assert!(!stmt.sql.contains("HAVING"));
        assert!(stmt.sql.ends_with("ORDER BY ABS(balance) DESC, p.name ASC LIMIT ?"));
        assert_eq!(stmt.values.map(|v| v.0.len()), Some(1));
    }

    #[test]
    fn test_statement_with_every_filter() {
        let stmt = candidate_statement(&parse_query("#1 2 ali balance>=10"), 100);
        assert!(stmt.sql.contains("p.id IN (?, ?)"));
        assert!(stmt.sql.contains("LOWER(p.name) LIKE ? ESCAPE '\\'"));
        assert!(stmt.sql.contains("HAVING balance >= ?"));
        let values = stmt.values.unwrap().0;
        assert_eq!(
            values,
            vec![
                Value::from(1_i64),
                Value::from(2_i64),
                Value::from("%ali%".to_string()),
                Value::from(1000_i64),
                Value::from(100_i64),
            ]
        );
    }
}
