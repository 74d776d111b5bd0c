//! Property-based tests for query parsing.

use debtbook_shared::types::{Amount, PersonId};
use proptest::prelude::*;

use super::query::{BalancePredicate, CompareOp, QueryToken, classify_token, parse_query};

fn arb_op() -> impl Strategy<Value = (CompareOp, &'static str)> {
    prop_oneof![
        Just((CompareOp::Lt, "<")),
        Just((CompareOp::Le, "<=")),
        Just((CompareOp::Gt, ">")),
        Just((CompareOp::Ge, ">=")),
        Just((CompareOp::Eq, "=")),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // =========================================================================
    // Ids
    // =========================================================================

    /// Any non-negative i64, with or without `#`, parses as that id.
    #[test]
    fn prop_digits_are_ids(id in 0i64..=i64::MAX, hash in any::<bool>()) {
        let token = if hash { format!("#{id}") } else { id.to_string() };
        prop_assert_eq!(classify_token(&token), Some(QueryToken::Id(PersonId::new(id))));
    }

    // =========================================================================
    // Balance expressions
    // =========================================================================

    /// `balance<op><cents>` carries the operand in minor units.
    #[test]
    fn prop_balance_expression(
        (op, spelled) in arb_op(),
        cents in -10_000_000i64..10_000_000i64,
    ) {
        let amount = Amount::from_minor(cents);
        let token = format!("balance{spelled}{amount}");
        prop_assert_eq!(
            classify_token(&token),
            Some(QueryToken::Balance(BalancePredicate::new(op, amount)))
        );
    }

    /// The last balance token in a query wins.
    #[test]
    fn prop_last_balance_wins(
        first in 0i64..1_000,
        second in 0i64..1_000,
    ) {
        let parsed = parse_query(&format!("balance>{first} alice balance<{second}"));
        prop_assert_eq!(
            parsed.balance,
            Some(BalancePredicate::new(CompareOp::Lt, Amount::from_major(second)))
        );
        prop_assert_eq!(parsed.keywords, vec!["alice".to_string()]);
    }

    // =========================================================================
    // Keywords
    // =========================================================================

    /// Alphabetic words become lowercase keywords in order.
    #[test]
    fn prop_words_become_keywords(words in prop::collection::vec("[a-zA-Z]{4,10}", 1..5)) {
        let reserved = ["debtors", "creditors", "positive", "negative", "settled", "zero", "balance"];
        prop_assume!(words.iter().all(|w| !reserved.contains(&w.to_lowercase().as_str())));
        let parsed = parse_query(&words.join("  "));
        let expected: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        prop_assert_eq!(parsed.keywords, expected);
        prop_assert!(parsed.ids.is_empty());
        prop_assert!(parsed.balance.is_none());
    }

    /// Parsing never panics and never yields empty keywords.
    #[test]
    fn prop_no_empty_keywords(raw in "\\PC{0,40}") {
        let parsed = parse_query(&raw);
        prop_assert!(parsed.keywords.iter().all(|k| !k.is_empty()));
    }
}
