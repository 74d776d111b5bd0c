//! Scoring and ordering of search candidates.

#![allow(clippy::float_arithmetic, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::cmp::Ordering;

use debtbook_shared::types::Amount;
use serde::{Deserialize, Serialize};

use super::normalize::{fold_case, normalize_text};
use super::query::ParsedQuery;
use super::similarity::ratio;
use crate::ledger::Person;

/// Bonus for a candidate whose id appears in the query.
pub const ID_BONUS: f64 = 0.6;

/// Bonus per matched keyword that starts the normalized name.
pub const PREFIX_BONUS: f64 = 0.15;

/// Bonus per matched keyword contained anywhere in the normalized name.
pub const CONTAINMENT_BONUS: f64 = 0.05;

/// Default number of results returned by a search.
pub const DEFAULT_LIMIT: usize = 25;

/// A person row returned by the candidate query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The person.
    pub person: Person,
    /// Their aggregated balance.
    pub balance: Amount,
}

/// A scored search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Matched person.
    pub person: Person,
    /// Their balance at query time.
    pub balance: Amount,
    /// Relevance score; may exceed 1.0 once bonuses are added.
    pub score: f64,
    /// Query keywords found inside the normalized name.
    pub matched_keywords: Vec<String>,
}

impl SearchResult {
    /// Score clamped to `[0, 1]` and rendered as a whole percentage.
    #[must_use]
    pub fn score_percent(&self) -> u8 {
        (self.score.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// The text a candidate name is compared against.
///
/// The keyword phrase when keywords were given, otherwise the raw query.
/// Returned already normalized.
#[must_use]
pub fn comparison_text(raw_query: &str, parsed: &ParsedQuery) -> String {
    if parsed.keywords.is_empty() {
        normalize_text(raw_query.trim())
    } else {
        normalize_text(&parsed.keyword_phrase())
    }
}

/// Scores one candidate against a parsed query.
///
/// `query_norm` is the output of [`comparison_text`].
#[must_use]
pub fn score_candidate(candidate: Candidate, parsed: &ParsedQuery, query_norm: &str) -> SearchResult {
    let name_norm = normalize_text(&candidate.person.name);
    let matched_keywords: Vec<String> = parsed
        .keywords
        .iter()
        .filter(|keyword| name_norm.contains(keyword.as_str()))
        .cloned()
        .collect();

    let mut score = if query_norm.is_empty() {
        1.0
    } else {
        ratio(&name_norm, query_norm)
    };
    if parsed.contains_id(candidate.person.id) {
        score += ID_BONUS;
    }
    for keyword in &matched_keywords {
        if name_norm.starts_with(keyword.as_str()) {
            score += PREFIX_BONUS;
        }
        score += CONTAINMENT_BONUS;
    }

    SearchResult {
        person: candidate.person,
        balance: candidate.balance,
        score,
        matched_keywords,
    }
}

/// Total order used for results: score desc, |balance| desc, folded name asc.
#[must_use]
pub fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.balance.abs().cmp(&a.balance.abs()))
        .then_with(|| fold_case(&a.person.name).cmp(&fold_case(&b.person.name)))
}

/// Scores, orders and truncates candidates.
#[must_use]
pub fn rank(
    candidates: Vec<Candidate>,
    raw_query: &str,
    parsed: &ParsedQuery,
    limit: usize,
) -> Vec<SearchResult> {
    let query_norm = comparison_text(raw_query, parsed);
    let mut results: Vec<SearchResult> = candidates
        .into_iter()
        .map(|candidate| score_candidate(candidate, parsed, &query_norm))
        .collect();
    results.sort_by(compare_results);
    results.truncate(limit);
    results
}
