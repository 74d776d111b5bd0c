//! CSV rendering of exported transactions.

use std::io::Write;

use ::csv::WriterBuilder;
use serde::Serialize;

use super::error::ExportError;
use super::types::ExportRow;

#[derive(Serialize)]
struct CsvRow<'a> {
    transaction_id: i64,
    person: &'a str,
    person_id: i64,
    #[serde(rename = "type")]
    kind: &'static str,
    amount: String,
    description: &'a str,
    created_at: String,
}

impl<'a> From<&'a ExportRow> for CsvRow<'a> {
    fn from(row: &'a ExportRow) -> Self {
        let tx = &row.transaction;
        Self {
            transaction_id: tx.id.into_inner(),
            person: &row.person_name,
            person_id: tx.person_id.into_inner(),
            kind: tx.kind().as_str(),
            amount: tx.amount.to_string(),
            description: &tx.description,
            created_at: tx.created_at.to_rfc3339(),
        }
    }
}

/// Writes `rows` as CSV with a header line.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn write_csv<W: Write>(writer: W, rows: &[ExportRow]) -> Result<(), ExportError> {
    let mut wrt = WriterBuilder::new().has_headers(false).from_writer(writer);
    wrt.write_record([
        "transaction_id",
        "person",
        "person_id",
        "type",
        "amount",
        "description",
        "created_at",
    ])?;
    for row in rows {
        wrt.serialize(CsvRow::from(row))?;
    }
    wrt.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Transaction;
    use chrono::{TimeZone, Utc};
    use debtbook_shared::types::{Amount, PersonId, TransactionId};

    fn row(id: i64, name: &str, minor: i64, description: &str) -> ExportRow {
        ExportRow {
            transaction: Transaction {
                id: TransactionId::new(id),
                person_id: PersonId::new(1),
                amount: Amount::from_minor(minor),
                description: description.to_string(),
                created_at: Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap(),
            },
            person_name: name.to_string(),
        }
    }

    #[test]
    fn test_write_csv() {
        let rows = vec![row(2, "Alice", -2000, "paid back"), row(1, "Alice", 5000, "lunch, drinks")];
        let mut out = Vec::new();
        write_csv(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "transaction_id,person,person_id,type,amount,description,created_at",
                "2,Alice,1,payment,-20.00,paid back,2024-02-03T04:05:06+00:00",
                "1,Alice,1,debt,50.00,\"lunch, drinks\",2024-02-03T04:05:06+00:00",
            ]
        );
    }

    #[test]
    fn test_write_csv_header_only_when_empty() {
        let mut out = Vec::new();
        write_csv(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "transaction_id,person,person_id,type,amount,description,created_at\n"
        );
    }
}
