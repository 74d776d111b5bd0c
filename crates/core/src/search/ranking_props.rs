//! Property-based tests for similarity and ranking.

#![allow(clippy::float_arithmetic)]

use chrono::{TimeZone, Utc};
use debtbook_shared::types::{Amount, PersonId};
use proptest::prelude::*;

use super::query::parse_query;
use super::ranking::{Candidate, ID_BONUS, rank, score_candidate};
use super::similarity::ratio;
use crate::ledger::Person;

fn arb_candidates() -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec(("[A-Za-z]{2,8}", -1_000i64..1_000i64), 0..20).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, balance))| Candidate {
                person: Person {
                    id: PersonId::new(i64::try_from(i).unwrap_or(0) + 1),
                    name,
                    created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                },
                balance: Amount::from_major(balance),
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Similarity stays within the unit interval and is 1 for identical strings.
    #[test]
    fn prop_ratio_bounds(a in "\\PC{0,12}", b in "\\PC{0,12}") {
        let r = ratio(&a, &b);
        prop_assert!((0.0..=1.0).contains(&r));
        prop_assert!((ratio(&a, &a) - 1.0).abs() < 1e-12);
    }

    /// Ranking is deterministic and ordered by descending score.
    #[test]
    fn prop_rank_deterministic(candidates in arb_candidates(), query in "[a-z]{1,5}") {
        let parsed = parse_query(&query);
        let first = rank(candidates.clone(), &query, &parsed, 25);
        let second = rank(candidates, &query, &parsed, 25);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.windows(2).all(|w| w[0].score >= w[1].score));
    }

    /// Naming a person's id adds exactly the id bonus.
    #[test]
    fn prop_id_bonus(name in "[A-Za-z]{2,8}", id in 1i64..10_000) {
        let person = Person {
            id: PersonId::new(id),
            name,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        let candidate = Candidate { person, balance: Amount::ZERO };
        let raw = format!("{id}");
        let with_id = score_candidate(candidate.clone(), &parse_query(&raw), &raw);
        let without = score_candidate(candidate, &Default::default(), &raw);
        prop_assert!((with_id.score - without.score - ID_BONUS).abs() < 1e-9);
    }
}
