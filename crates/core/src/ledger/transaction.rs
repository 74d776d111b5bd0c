//! Signed ledger entries.

use chrono::{DateTime, Utc};
use debtbook_shared::types::{Amount, PersonId, TransactionId};
use serde::{Deserialize, Serialize};

/// Kind of a transaction, derived from the sign of its amount.
///
/// The kind is never stored: positive amounts are debts, negative ones payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// The person incurred a debt (positive amount).
    Debt,
    /// The person paid money back (negative amount).
    Payment,
}

impl TransactionKind {
    /// Classifies an amount. Zero counts as a debt entry.
    #[must_use]
    pub const fn of(amount: Amount) -> Self {
        if amount.is_negative() {
            Self::Payment
        } else {
            Self::Debt
        }
    }

    /// Returns the lowercase label used in exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debt => "debt",
            Self::Payment => "payment",
        }
    }

    /// Applies the sign convention to a user-entered magnitude.
    #[must_use]
    pub const fn signed(self, magnitude: Amount) -> Amount {
        let abs = magnitude.abs();
        match self {
            Self::Debt => abs,
            Self::Payment => Amount::from_minor(-abs.minor()),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable ledger entry owned by one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Row id.
    pub id: TransactionId,
    /// Owning person.
    pub person_id: PersonId,
    /// Signed amount: positive = debt, negative = payment.
    pub amount: Amount,
    /// Free text, possibly empty.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Returns the kind derived from the amount sign.
    #[must_use]
    pub const fn kind(&self) -> TransactionKind {
        TransactionKind::of(self.amount)
    }

    /// Returns true if this entry is a payment.
    #[must_use]
    pub const fn is_payment(&self) -> bool {
        self.amount.is_negative()
    }
}
