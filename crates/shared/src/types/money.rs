//! Signed ledger amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are stored as integer minor units (cents) so that SQL sums and
//! balance comparisons are exact. `rust_decimal::Decimal` is only used at
//! the edges, when parsing user input and rendering values.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places carried by an [`Amount`].
pub const AMOUNT_SCALE: u32 = 2;

/// A signed monetary amount in minor units.
///
/// Positive amounts are debts incurred, negative amounts are payments made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units (e.g. cents).
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Creates an amount from whole major units.
    ///
    /// Saturates at the `i64` bounds.
    #[must_use]
    pub const fn from_major(major: i64) -> Self {
        Self(major.saturating_mul(10_i64.pow(AMOUNT_SCALE)))
    }

    /// Converts a decimal value into minor units.
    ///
    /// Extra fractional digits are rounded half away from zero. Returns `None`
    /// when the value does not fit.
    #[must_use]
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        value
            .checked_mul(Decimal::from(10_i64.pow(AMOUNT_SCALE)))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Self)
    }

    /// Returns the raw minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns the value as a decimal with [`AMOUNT_SCALE`] places.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, AMOUNT_SCALE)
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is strictly negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value, saturating at `i64::MAX`.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl std::str::FromStr for Amount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Decimal = s
            .trim()
            .parse()
            .map_err(|e| format!("invalid amount '{s}': {e}"))?;
        Self::from_decimal(value).ok_or_else(|| format!("amount out of range: {s}"))
    }
}

impl From<i64> for Amount {
    fn from(minor: i64) -> Self {
        Self(minor)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
