//! Export selection and row types.

use debtbook_shared::types::PersonId;
use serde::{Deserialize, Serialize};

use crate::ledger::{Transaction, TransactionKind};

/// Which transactions to export. The default selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFilter {
    /// Only debts or only payments.
    pub kind: Option<TransactionKind>,
    /// Only these people. `Some(vec![])` selects nothing.
    pub person_ids: Option<Vec<PersonId>>,
}

impl ExportFilter {
    /// Selects every transaction.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to one kind.
    #[must_use]
    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restricts to a set of people.
    #[must_use]
    pub fn with_people(mut self, ids: impl IntoIterator<Item = PersonId>) -> Self {
        self.person_ids = Some(ids.into_iter().collect());
        self
    }

    /// Returns true when the filter can match nothing.
    #[must_use]
    pub fn is_vacuous(&self) -> bool {
        self.person_ids.as_ref().is_some_and(Vec::is_empty)
    }

    /// Returns true if `row` passes the filter.
    #[must_use]
    pub fn accepts(&self, row: &ExportRow) -> bool {
        self.kind.is_none_or(|kind| row.transaction.kind() == kind)
            && self
                .person_ids
                .as_ref()
                .is_none_or(|ids| ids.contains(&row.transaction.person_id))
    }
}

/// A transaction joined with its owner's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    /// The transaction.
    pub transaction: Transaction,
    /// Owner's name at export time.
    pub person_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use debtbook_shared::types::{Amount, TransactionId};

    fn row(person: i64, amount: i64) -> ExportRow {
        ExportRow {
            transaction: Transaction {
                id: TransactionId::new(1),
                person_id: PersonId::new(person),
                amount: Amount::from_major(amount),
                description: String::new(),
                created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            },
            person_name: "Alice".into(),
        }
    }

    #[test]
    fn test_default_accepts_everything() {
        let filter = ExportFilter::all();
        assert!(filter.accepts(&row(1, 10)));
        assert!(filter.accepts(&row(2, -10)));
        assert!(!filter.is_vacuous());
    }

    #[test]
    fn test_kind_and_people() {
        let filter = ExportFilter::all()
            .with_kind(TransactionKind::Payment)
            .with_people([PersonId::new(2)]);
        assert!(filter.accepts(&row(2, -5)));
        assert!(!filter.accepts(&row(2, 5)));
        assert!(!filter.accepts(&row(1, -5)));
    }

    #[test]
    fn test_empty_people_is_vacuous() {
        let filter = ExportFilter::all().with_people(Vec::<PersonId>::new());
        assert!(filter.is_vacuous());
        assert!(!filter.accepts(&row(1, 10)));
    }
}
