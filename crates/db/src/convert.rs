//! Row to domain conversions.

use debtbook_core::dashboard::{DebtorSummary, RecentActivity};
use debtbook_core::export::ExportRow;
use debtbook_core::ledger::{Person, PersonUsage, Transaction};
use debtbook_core::search::Candidate;
use debtbook_shared::types::{Amount, PersonId, TransactionId};

use crate::entities::{people, transactions};
use crate::repositories::{ActivityRow, DebtorRow, PersonBalanceRow, PersonUsageRow};

impl From<people::Model> for Person {
    fn from(model: people::Model) -> Self {
        Self {
            id: PersonId::new(model.id),
            name: model.name,
            created_at: model.created_at,
        }
    }
}

impl From<transactions::Model> for Transaction {
    fn from(model: transactions::Model) -> Self {
        Self {
            id: TransactionId::new(model.id),
            person_id: PersonId::new(model.person_id),
            amount: Amount::from_minor(model.amount),
            description: model.description,
            created_at: model.created_at,
        }
    }
}

impl From<PersonUsageRow> for PersonUsage {
    fn from(row: PersonUsageRow) -> Self {
        Self {
            person: Person {
                id: PersonId::new(row.id),
                name: row.name,
                created_at: row.created_at,
            },
            transaction_count: u64::try_from(row.transaction_count).unwrap_or(0),
            balance: Amount::from_minor(row.balance),
        }
    }
}

impl From<PersonBalanceRow> for Candidate {
    fn from(row: PersonBalanceRow) -> Self {
        Self {
            person: Person {
                id: PersonId::new(row.id),
                name: row.name,
                created_at: row.created_at,
            },
            balance: Amount::from_minor(row.balance),
        }
    }
}

impl From<DebtorRow> for DebtorSummary {
    fn from(row: DebtorRow) -> Self {
        Self {
            person_id: PersonId::new(row.id),
            name: row.name,
            balance: Amount::from_minor(row.balance),
        }
    }
}

fn split_activity(row: ActivityRow) -> (Transaction, String) {
    let transaction = Transaction {
        id: TransactionId::new(row.id),
        person_id: PersonId::new(row.person_id),
        amount: Amount::from_minor(row.amount),
        description: row.description,
        created_at: row.created_at,
    };
    (transaction, row.person_name)
}

impl From<ActivityRow> for RecentActivity {
    fn from(row: ActivityRow) -> Self {
        let (transaction, person_name) = split_activity(row);
        Self {
            transaction,
            person_name,
        }
    }
}

impl From<ActivityRow> for ExportRow {
    fn from(row: ActivityRow) -> Self {
        let (transaction, person_name) = split_activity(row);
        Self {
            transaction,
            person_name,
        }
    }
}
