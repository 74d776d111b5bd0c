//! Debtbook CSV exporter.
//!
//! Writes every matching transaction, newest first, to `OUTPUT` or stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use debtbook_core::export::{ExportFilter, write_csv};
use debtbook_core::ledger::TransactionKind;
use debtbook_db::LedgerStore;
use debtbook_shared::AppConfig;
use debtbook_shared::types::PersonId;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "debtbook-export")]
#[command(about = "Export Debtbook transactions as CSV")]
struct Cli {
    /// Only debts (positive amounts)
    #[arg(long, conflicts_with = "payments")]
    debts: bool,

    /// Only payments (negative amounts)
    #[arg(long)]
    payments: bool,

    /// Restrict to a person id; repeatable
    #[arg(long = "person", value_name = "ID")]
    people: Vec<i64>,

    /// Output file (stdout when omitted)
    output: Option<PathBuf>,
}

impl Cli {
    fn filter(&self) -> ExportFilter {
        let mut filter = ExportFilter::all();
        if self.debts {
            filter = filter.with_kind(TransactionKind::Debt);
        } else if self.payments {
            filter = filter.with_kind(TransactionKind::Payment);
        }
        if !self.people.is_empty() {
            filter = filter.with_people(self.people.iter().copied().map(PersonId::new));
        }
        filter
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays pure CSV.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debtbook=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let store = LedgerStore::open(&config).await?;
    let rows = store.export_transactions(&cli.filter()).await?;
    store.close().await?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_csv(&mut writer, &rows)?;
            writer.flush()?;
        }
        None => write_csv(io::stdout().lock(), &rows)?,
    }
    info!(rows = rows.len(), output = ?cli.output, "Exported transactions");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_filters_and_output() {
        let cli = Cli::try_parse_from([
            "debtbook-export",
            "--debts",
            "--person",
            "3",
            "--person=7",
            "out.csv",
        ])
        .unwrap();
        assert_eq!(
            cli.filter(),
            ExportFilter::all()
                .with_kind(TransactionKind::Debt)
                .with_people([PersonId::new(3), PersonId::new(7)])
        );
        assert_eq!(cli.output, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_parse_defaults_to_everything_on_stdout() {
        let cli = Cli::try_parse_from(["debtbook-export"]).unwrap();
        assert_eq!(cli.filter(), ExportFilter::all());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Cli::try_parse_from(["debtbook-export", "--debts", "--payments"]).is_err());
        assert!(Cli::try_parse_from(["debtbook-export", "--person", "bob"]).is_err());
        assert!(Cli::try_parse_from(["debtbook-export", "--person"]).is_err());
        assert!(Cli::try_parse_from(["debtbook-export", "--verbose"]).is_err());
    }
}
