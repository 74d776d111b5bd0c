//! Free-text search query parsing.
//!
//! A query is split on whitespace and every token is classified as a person
//! id, a balance predicate, or a name keyword. Parsing never fails: anything
//! that is not recognised becomes a keyword.

use debtbook_shared::types::{Amount, PersonId};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Lower bound on the number of candidate rows fetched for ranking.
pub const MIN_FETCH_LIMIT: u64 = 50;

/// Candidate rows fetched per requested result.
pub const FETCH_MULTIPLIER: u64 = 4;

/// Comparison operator of a balance predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `=`
    Eq,
}

impl CompareOp {
    /// Returns the SQL spelling of the operator.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "=",
        }
    }

    /// Evaluates `lhs <op> rhs`.
    #[must_use]
    pub fn holds<T: Ord>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
            Self::Eq => lhs == rhs,
        }
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A filter on a person's aggregated balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BalancePredicate {
    /// Comparison operator.
    pub op: CompareOp,
    /// Right-hand operand.
    pub operand: Amount,
}

impl BalancePredicate {
    /// Creates a predicate.
    #[must_use]
    pub const fn new(op: CompareOp, operand: Amount) -> Self {
        Self { op, operand }
    }

    /// `balance > 0`
    pub const DEBTORS: Self = Self::new(CompareOp::Gt, Amount::ZERO);
    /// `balance < 0`
    pub const CREDITORS: Self = Self::new(CompareOp::Lt, Amount::ZERO);
    /// `balance = 0`
    pub const SETTLED: Self = Self::new(CompareOp::Eq, Amount::ZERO);
    /// Satisfied by no balance: nothing is below `i64::MIN` minor units.
    pub const UNSATISFIABLE: Self = Self::new(CompareOp::Lt, Amount::from_minor(i64::MIN));

    /// Returns true if `balance` satisfies the predicate.
    #[must_use]
    pub fn matches(&self, balance: Amount) -> bool {
        self.op.holds(&balance, &self.operand)
    }
}

/// One classified query token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryToken {
    /// A bare (optionally `#`-prefixed) person id.
    Id(PersonId),
    /// A balance alias or `balance<op><number>` expression.
    Balance(BalancePredicate),
    /// A lowercased name fragment.
    Keyword(String),
}

/// The structured form of a search query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuery {
    /// Person ids, in query order.
    pub ids: Vec<PersonId>,
    /// The last balance predicate in the query, if any.
    pub balance: Option<BalancePredicate>,
    /// Lowercased keywords, in query order.
    pub keywords: Vec<String>,
}

impl ParsedQuery {
    /// Returns true when the query carries no filter of any kind.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.balance.is_none() && self.keywords.is_empty()
    }

    /// Returns true if `id` was named in the query.
    #[must_use]
    pub fn contains_id(&self, id: PersonId) -> bool {
        self.ids.contains(&id)
    }

    /// The keyword phrase used for similarity scoring.
    #[must_use]
    pub fn keyword_phrase(&self) -> String {
        self.keywords.join(" ")
    }
}

/// Parses a raw query string.
#[must_use]
pub fn parse_query(raw: &str) -> ParsedQuery {
    let mut parsed = ParsedQuery::default();
    for token in raw.split_whitespace().filter_map(classify_token) {
        match token {
            QueryToken::Id(id) => parsed.ids.push(id),
            QueryToken::Balance(predicate) => parsed.balance = Some(predicate),
            QueryToken::Keyword(keyword) => parsed.keywords.push(keyword),
        }
    }
    parsed
}

/// Classifies a single whitespace-free token.
///
/// Returns `None` for tokens that are empty once a leading `#` is removed.
#[must_use]
pub fn classify_token(token: &str) -> Option<QueryToken> {
    let lowered = token.trim().to_lowercase();
    let normalized = lowered.strip_prefix('#').unwrap_or(&lowered);
    if normalized.is_empty() {
        return None;
    }

    if normalized.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(id) = normalized.parse::<i64>() {
            return Some(QueryToken::Id(PersonId::new(id)));
        }
    }

    if let Some(predicate) = balance_alias(normalized).or_else(|| balance_expression(normalized)) {
        return Some(QueryToken::Balance(predicate));
    }

    Some(QueryToken::Keyword(normalized.to_string()))
}

/// Number of candidate rows to fetch for a result `limit`.
#[must_use]
pub fn fetch_limit(limit: u64) -> u64 {
    limit.saturating_mul(FETCH_MULTIPLIER).max(MIN_FETCH_LIMIT)
}

fn balance_alias(token: &str) -> Option<BalancePredicate> {
    match token {
        "debtors" | "positive" | "balance>0" => Some(BalancePredicate::DEBTORS),
        "creditors" | "negative" | "balance<0" => Some(BalancePredicate::CREDITORS),
        "settled" | "zero" | "balance=0" => Some(BalancePredicate::SETTLED),
        _ => None,
    }
}

/// Parses `balance<op><number>` where number is `-?\d+(\.\d+)?`.
fn balance_expression(token: &str) -> Option<BalancePredicate> {
    let rest = token.strip_prefix("balance")?;
    let (op, number) = if let Some(n) = rest.strip_prefix("<=") {
        (CompareOp::Le, n)
    } else if let Some(n) = rest.strip_prefix(">=") {
        (CompareOp::Ge, n)
    } else if let Some(n) = rest.strip_prefix('<') {
        (CompareOp::Lt, n)
    } else if let Some(n) = rest.strip_prefix('>') {
        (CompareOp::Gt, n)
    } else if let Some(n) = rest.strip_prefix('=') {
        (CompareOp::Eq, n)
    } else {
        return None;
    };

    if !is_plain_number(number) {
        return None;
    }
    Some(minor_bound(op, number))
}

/// Turns a decimal operand into a whole-minor-unit bound with the same
/// meaning over integer balances.
///
/// `>` and `<=` round the scaled operand down, `<` and `>=` round it up. An
/// `=` against a fractional cent can never hold. Operands beyond the `i64`
/// range saturate towards their sign.
fn minor_bound(op: CompareOp, number: &str) -> BalancePredicate {
    let negative = number.starts_with('-');
    let Some(scaled) = number
        .parse::<Decimal>()
        .ok()
        .and_then(|value| value.checked_mul(Decimal::ONE_HUNDRED))
    else {
        return saturated(op, negative);
    };

    let bound = match op {
        CompareOp::Gt | CompareOp::Le => scaled.floor(),
        CompareOp::Lt | CompareOp::Ge => scaled.ceil(),
        CompareOp::Eq if scaled.fract().is_zero() => scaled,
        CompareOp::Eq => return BalancePredicate::UNSATISFIABLE,
    };
    match bound.to_i64() {
        Some(minor) => BalancePredicate::new(op, Amount::from_minor(minor)),
        None => saturated(op, negative),
    }
}

fn saturated(op: CompareOp, negative: bool) -> BalancePredicate {
    if op == CompareOp::Eq {
        return BalancePredicate::UNSATISFIABLE;
    }
    let minor = if negative { i64::MIN } else { i64::MAX };
    BalancePredicate::new(op, Amount::from_minor(minor))
}

fn is_plain_number(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    digits(whole) && fraction.is_none_or(digits)
}
