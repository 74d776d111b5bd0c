//! Fuzzy person search.
//!
//! A raw query is parsed into ids, a balance predicate and keywords
//! ([`query`]). The storage layer turns that into a candidate fetch; the
//! candidates are then scored and ordered here ([`ranking`]). When nothing
//! matches a name-like query, close names are offered instead ([`suggest`]).

pub mod normalize;
pub mod query;
pub mod ranking;
pub mod similarity;
pub mod suggest;

#[cfg(test)]
mod query_props;
#[cfg(test)]
mod ranking_props;

use serde::{Deserialize, Serialize};

pub use normalize::{fold_case, normalize_text};
pub use query::{BalancePredicate, CompareOp, ParsedQuery, QueryToken, fetch_limit, parse_query};
pub use ranking::{Candidate, DEFAULT_LIMIT, SearchResult, comparison_text, rank};
pub use similarity::ratio;
pub use suggest::{should_suggest, suggest};

/// Result of a person search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query as received, trimmed.
    pub query: String,
    /// Ranked matches, best first.
    pub matches: Vec<SearchResult>,
    /// Close names offered when nothing matched.
    pub suggestions: Vec<String>,
}

impl SearchResponse {
    /// Returns true when neither matches nor suggestions were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.suggestions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Person;
    use chrono::{TimeZone, Utc};
    use debtbook_shared::types::{Amount, PersonId};

    #[test]
    fn test_response_json_shape() {
        let response = SearchResponse {
            query: "ali".to_string(),
            matches: vec![SearchResult {
                person: Person {
                    id: PersonId::new(3),
                    name: "Alice".to_string(),
                    created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
                },
                balance: Amount::from_minor(3_000),
                score: 0.75,
                matched_keywords: vec!["ali".to_string()],
            }],
            suggestions: Vec::new(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["matches"][0]["person"]["id"], 3);
        assert_eq!(json["matches"][0]["balance"], 3_000);
        assert_eq!(json["matches"][0]["matched_keywords"][0], "ali");
        assert!(json["suggestions"].as_array().unwrap().is_empty());

        let back: SearchResponse = serde_json::from_value(json).unwrap();
        assert_eq!(back, response);
    }

    #[test]
    fn test_empty_response() {
        assert!(SearchResponse::default().is_empty());
    }
}
