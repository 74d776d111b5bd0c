//! Property-based tests for ledger input validation and sign conventions.

use debtbook_shared::types::Amount;
use proptest::prelude::*;

use super::transaction::TransactionKind;
use super::validation::clean_name;

/// Strategy for names with arbitrary surrounding whitespace.
fn padded_name() -> impl Strategy<Value = (String, String, String)> {
    (
        "[ \t\n]{0,4}",
        "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]",
        "[ \t\n]{0,4}",
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Cleaning strips outer whitespace and nothing else.
    #[test]
    fn prop_clean_name_trims((lead, core, tail) in padded_name()) {
        let raw = format!("{lead}{core}{tail}");
        let cleaned = clean_name(&raw).unwrap();
        prop_assert_eq!(cleaned, core);
    }

    /// Whitespace-only input is always rejected.
    #[test]
    fn prop_blank_names_rejected(raw in "[ \t\n\r]{0,12}") {
        prop_assert!(clean_name(&raw).is_err());
    }

    /// Cleaning is idempotent.
    #[test]
    fn prop_clean_name_idempotent(raw in "\\PC{1,30}") {
        if let Ok(once) = clean_name(&raw) {
            prop_assert_eq!(clean_name(&once).unwrap(), once);
        }
    }

    /// Signed amounts always classify back to the kind that produced them.
    #[test]
    fn prop_signed_kind_roundtrip(cents in 1i64..100_000_000i64, payment in any::<bool>()) {
        let kind = if payment { TransactionKind::Payment } else { TransactionKind::Debt };
        let signed = kind.signed(Amount::from_minor(cents));
        prop_assert_eq!(TransactionKind::of(signed), kind);
        prop_assert_eq!(signed.abs(), Amount::from_minor(cents));
    }
}
