//! Property-based tests for the ledger store's history and balances.

use chrono::Duration;
use debtbook_shared::types::{Amount, PersonId};
use proptest::prelude::*;

mod common;

const PEOPLE: usize = 3;

/// Strategy for `(person index, amount in minor units, minutes to advance)`.
fn entries() -> impl Strategy<Value = Vec<(usize, i64, i64)>> {
    prop::collection::vec((0..PEOPLE, -1_000_000_i64..=1_000_000, 0_i64..=2), 1..24)
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Every insert adds exactly one history entry on top of the unchanged
    /// earlier ones, and each balance stays the sum of that person's amounts.
    #[test]
    fn prop_history_append_only_and_balance_additive(entries in entries()) {
        runtime().block_on(async {
            let t = common::open().await;
            let mut ids: Vec<PersonId> = Vec::new();
            for name in ["Alice", "Bob", "Carol"] {
                ids.push(t.store.add_person(name).await.unwrap().id);
            }
            let mut histories = vec![Vec::new(); PEOPLE];
            let mut sums = [0_i64; PEOPLE];

            for (who, minor, minutes) in entries {
                t.clock.advance(Duration::minutes(minutes));
                let tx = t
                    .store
                    .add_transaction(ids[who], Amount::from_minor(minor), "entry")
                    .await
                    .unwrap();
                sums[who] += minor;

                let history = t.store.get_history(ids[who], None, None).await.unwrap();
                prop_assert_eq!(history.len(), histories[who].len() + 1);
                prop_assert_eq!(&history[0], &tx);
                prop_assert_eq!(&history[1..], histories[who].as_slice());
                histories[who] = history;

                for (index, id) in ids.iter().enumerate() {
                    let balance = t.store.get_balance(*id).await.unwrap();
                    prop_assert_eq!(balance, Amount::from_minor(sums[index]));
                    let summed: Amount = histories[index].iter().map(|tx| tx.amount).sum();
                    prop_assert_eq!(summed, balance);
                }
            }
            Ok(())
        })?;
    }
}
