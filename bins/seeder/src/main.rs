//! Demo data seeder for Debtbook development and testing.
//!
//! Adds a handful of people with debts and repayments so search and the
//! dashboard have something to show. People that already exist are left
//! alone, so running the seeder twice is harmless.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use debtbook_core::ledger::LedgerError;
use debtbook_db::LedgerStore;
use debtbook_shared::AppConfig;
use debtbook_shared::types::Amount;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Demo people and their transactions (major units, description).
const SEED: &[(&str, &[(Decimal, &str)])] = &[
    ("Alice Johnson", &[(dec!(50), "lunch"), (dec!(-20), "repayment")]),
    ("Bob Smith", &[(dec!(-10), "paid in advance")]),
    ("Carol White", &[(dec!(120.50), "concert tickets"), (dec!(-120.50), "settled up")]),
    ("José García", &[(dec!(35.25), "taxi"), (dec!(12), "coffee beans")]),
    ("Malik Ali", &[(dec!(200), "rent share")]),
    ("Zoë Müller", &[]),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debtbook=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let store = LedgerStore::open(&config).await?;

    let mut added = 0usize;
    for (name, transactions) in SEED {
        let person = match store.add_person(name).await {
            Ok(person) => person,
            Err(LedgerError::DuplicateName(_)) => {
                warn!(name, "Person already exists, skipping");
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        for (major, description) in *transactions {
            let amount = Amount::from_decimal(*major)
                .with_context(|| format!("amount out of range: {major}"))?;
            store.add_transaction(person.id, amount, description).await?;
        }
        added += 1;
    }

    let summary = store.get_dashboard_summary(5, 0).await?;
    info!(
        added,
        total_debt = %summary.totals.total_debt,
        total_payments = %summary.totals.total_payments,
        outstanding = %summary.totals.outstanding,
        "Seeding complete"
    );

    store.close().await?;
    Ok(())
}
