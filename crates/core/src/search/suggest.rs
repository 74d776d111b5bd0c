//! "Did you mean" fallback for searches without matches.

#![allow(clippy::float_arithmetic)]

use super::normalize::normalize_text;
use super::query::ParsedQuery;
use super::ranking::SearchResult;
use super::similarity::ratio;

/// How many recently created names are considered.
pub const SUGGESTION_POOL_SIZE: u64 = 200;

/// Minimum similarity for a name to be suggested.
pub const SUGGESTION_THRESHOLD: f64 = 0.45;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 5;

/// Suggestions are only computed when nothing matched and the user typed a name.
#[must_use]
pub fn should_suggest(matches: &[SearchResult], parsed: &ParsedQuery) -> bool {
    matches.is_empty() && !parsed.keywords.is_empty()
}

/// Picks the names closest to `query_norm` from `pool`.
///
/// `pool` is expected newest first; equally similar names keep that order.
#[must_use]
pub fn suggest<I, S>(pool: I, query_norm: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut scored: Vec<(f64, String)> = pool
        .into_iter()
        .map(Into::into)
        .filter_map(|name| {
            let similarity = ratio(&normalize_text(&name), query_norm);
            (similarity >= SUGGESTION_THRESHOLD).then_some((similarity, name))
        })
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, name)| name)
        .collect()
}
