//! Ledger schema: people and their transactions.
//!
//! Timestamps are RFC 3339 UTC text, which sorts chronologically.
//! Amounts are signed integer minor units.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for sql in UP_SQL {
            db.execute_unprepared(sql).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS transactions;")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS people;").await?;
        Ok(())
    }
}

const PEOPLE_SQL: &str = r"
CREATE TABLE IF NOT EXISTS people (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id INTEGER NOT NULL REFERENCES people(id) ON DELETE CASCADE,
    amount INTEGER NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);
";

// Case-insensitive name lookups
const IDX_PEOPLE_NAME_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_people_name_nocase ON people(name COLLATE NOCASE);";

// Per-person history, newest first
const IDX_TX_PERSON_SQL: &str = "CREATE INDEX IF NOT EXISTS idx_transactions_person_created \
     ON transactions(person_id, created_at DESC);";

// Global recent activity
const IDX_TX_CREATED_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_transactions_created ON transactions(created_at DESC);";

const UP_SQL: [&str; 5] = [
    PEOPLE_SQL,
    TRANSACTIONS_SQL,
    IDX_PEOPLE_NAME_SQL,
    IDX_TX_PERSON_SQL,
    IDX_TX_CREATED_SQL,
];
