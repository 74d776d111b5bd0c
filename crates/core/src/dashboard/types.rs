//! Dashboard data types.

use chrono::{DateTime, Utc};
use debtbook_shared::types::{Amount, PersonId};
use serde::{Deserialize, Serialize};

use crate::ledger::{Transaction, TransactionKind};

/// Ledger-wide totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTotals {
    /// Sum of all positive amounts.
    pub total_debt: Amount,
    /// Sum of all negative amounts (zero or negative).
    pub total_payments: Amount,
    /// Sum of all amounts.
    pub outstanding: Amount,
}

impl DashboardTotals {
    /// Builds totals from the two signed sums.
    #[must_use]
    pub fn from_sums(total_debt: Amount, total_payments: Amount) -> Self {
        Self {
            total_debt,
            total_payments,
            outstanding: total_debt + total_payments,
        }
    }
}

/// A person with a positive balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtorSummary {
    /// Person id.
    pub person_id: PersonId,
    /// Person name.
    pub name: String,
    /// Their (positive) balance.
    pub balance: Amount,
}

/// A recent transaction with its owner's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentActivity {
    /// The transaction.
    pub transaction: Transaction,
    /// Owner's name.
    pub person_name: String,
}

impl RecentActivity {
    /// Kind derived from the amount sign.
    #[must_use]
    pub const fn kind(&self) -> TransactionKind {
        self.transaction.kind()
    }

    /// Timestamp of the transaction.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.transaction.created_at
    }
}

/// Dashboard response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Ledger-wide totals.
    pub totals: DashboardTotals,
    /// Largest debtors, balance descending then name ascending.
    pub top_debtors: Vec<DebtorSummary>,
    /// Newest transactions first.
    pub recent_activity: Vec<RecentActivity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_from_sums() {
        let totals = DashboardTotals::from_sums(Amount::from_major(80), Amount::from_major(-20));
        assert_eq!(totals.outstanding, Amount::from_major(60));
        assert_eq!(totals.total_debt, Amount::from_major(80));
        assert_eq!(totals.total_payments, Amount::from_major(-20));
    }

    #[test]
    fn test_empty_summary() {
        let summary = DashboardSummary::default();
        assert!(summary.totals.outstanding.is_zero());
        assert!(summary.top_debtors.is_empty());
        assert!(summary.recent_activity.is_empty());
    }
}
