//! Database migration runner for Debtbook.
//!
//! The database file comes from the usual configuration
//! (`config/default.toml`, `DEBTBOOK__DATABASE__PATH`).

use anyhow::Context;
use clap::{Parser, Subcommand};
use debtbook_db::migration::Migrator;
use debtbook_shared::AppConfig;
use sea_orm_migration::MigratorTrait;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "migrator")]
#[command(about = "Debtbook database migrations")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Run all pending migrations (default)
    Up,
    /// Roll back the last migration
    Down,
    /// Show migration status
    Status,
    /// Drop all tables and re-run every migration
    Fresh,
}

impl Command {
    fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Status => "status",
            Self::Fresh => "fresh",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let command = Cli::parse().command.unwrap_or(Command::Up);
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debtbook=info,sea_orm_migration=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let db = debtbook_db::connect(&config.database)
        .await
        .with_context(|| format!("failed to open {}", config.database.path.display()))?;

    match command {
        Command::Up => Migrator::up(&db, None).await?,
        Command::Down => Migrator::down(&db, Some(1)).await?,
        Command::Status => Migrator::status(&db).await?,
        Command::Fresh => Migrator::fresh(&db).await?,
    }
    info!(
        command = command.name(),
        path = %config.database.path.display(),
        "Migration command finished"
    );

    db.close().await?;
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
    fn test_subcommands() {
        let parse = |args: &[&str]| Cli::try_parse_from(args).map(|cli| cli.command);
        assert_eq!(parse(&["migrator"]).unwrap(), None);
        assert_eq!(parse(&["migrator", "down"]).unwrap(), Some(Command::Down));
        assert_eq!(parse(&["migrator", "fresh"]).unwrap(), Some(Command::Fresh));
        assert!(parse(&["migrator", "sideways"]).is_err());
    }
}
