//! People owning ledger entries.

use chrono::{DateTime, Utc};
use debtbook_shared::types::{Amount, PersonId};
use serde::{Deserialize, Serialize};

/// A person tracked by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Row id assigned on creation.
    pub id: PersonId,
    /// Trimmed, non-empty display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Which side of the ledger a person currently sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    /// The person owes money (positive balance).
    Debtor,
    /// The person is owed money (negative balance).
    Creditor,
    /// Nothing outstanding.
    Settled,
}

impl BalanceStatus {
    /// Classifies a balance.
    #[must_use]
    pub const fn of(balance: Amount) -> Self {
        if balance.is_positive() {
            Self::Debtor
        } else if balance.is_negative() {
            Self::Creditor
        } else {
            Self::Settled
        }
    }
}

/// A person annotated with how much their ledger is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonUsage {
    /// The person.
    pub person: Person,
    /// Number of transactions they own.
    pub transaction_count: u64,
    /// Sum of their transaction amounts.
    pub balance: Amount,
}

/// Orders people for "pick a person" listings.
///
/// Most used first, then largest absolute balance, then name. When nobody
/// has any transactions the usage key is dropped and the listing falls back
/// to balance then name.
pub fn sort_by_usage(rows: &mut [PersonUsage]) {
    let any_usage = rows.iter().any(|row| row.transaction_count > 0);
    rows.sort_by(|a, b| {
        let usage = if any_usage {
            b.transaction_count.cmp(&a.transaction_count)
        } else {
            std::cmp::Ordering::Equal
        };
        usage
            .then_with(|| b.balance.abs().cmp(&a.balance.abs()))
            .then_with(|| a.person.name.cmp(&b.person.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn usage(id: i64, name: &str, count: u64, balance: i64) -> PersonUsage {
        PersonUsage {
            person: Person {
                id: PersonId::new(id),
                name: name.to_string(),
                created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            },
            transaction_count: count,
            balance: Amount::from_major(balance),
        }
    }

    fn names(rows: &[PersonUsage]) -> Vec<&str> {
        rows.iter().map(|r| r.person.name.as_str()).collect()
    }

    #[test]
    fn test_balance_status() {
        assert_eq!(BalanceStatus::of(Amount::from_major(30)), BalanceStatus::Debtor);
        assert_eq!(BalanceStatus::of(Amount::from_major(-10)), BalanceStatus::Creditor);
        assert_eq!(BalanceStatus::of(Amount::ZERO), BalanceStatus::Settled);
    }

    #[test]
    fn test_sort_by_usage_count_first() {
        let mut rows = vec![
            usage(1, "Carol", 1, 500),
            usage(2, "Alice", 3, 10),
            usage(3, "Bob", 3, -40),
            usage(4, "Dave", 0, 0),
        ];
        sort_by_usage(&mut rows);
        assert_eq!(names(&rows), vec!["Bob", "Alice", "Carol", "Dave"]);
    }

    #[test]
    fn test_sort_by_usage_name_breaks_ties() {
        let mut rows = vec![usage(1, "Zed", 2, 20), usage(2, "Amy", 2, -20)];
        sort_by_usage(&mut rows);
        assert_eq!(names(&rows), vec!["Amy", "Zed"]);
    }

    #[test]
    fn test_sort_without_usage_falls_back_to_name() {
        let mut rows = vec![usage(1, "Carol", 0, 0), usage(2, "Alice", 0, 0)];
        sort_by_usage(&mut rows);
        assert_eq!(names(&rows), vec!["Alice", "Carol"]);
    }
}
