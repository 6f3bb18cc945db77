//! Money types with precise decimal arithmetic
//!
//! The ledger bills in a single implicit currency, so `Money` is a thin
//! wrapper over `rust_decimal::Decimal`. Amounts are kept at 4 decimal
//! places internally and displayed at cent precision.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Internal precision for monetary amounts
pub const MONEY_PRECISION: u32 = 4;

/// Display precision for monetary amounts
pub const CENT_PRECISION: u32 = 2;

/// A monetary amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a new Money value, rounded to internal precision
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp(MONEY_PRECISION))
    }

    /// Creates Money from an integer amount in cents
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, CENT_PRECISION))
    }

    /// Returns a zero amount
    pub fn zero() -> Self {
        Self(dec!(0))
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Multiplies by a scalar (e.g., a quantity of energy units)
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.0 * factor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.0.round_dp(CENT_PRECISION);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            write!(f, "-${:.2}", rounded.abs())
        } else {
            write!(f, "${:.2}", rounded.abs())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.0 - other.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, factor: Decimal) -> Self {
        self.multiply(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// A price per unit of energy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(Money);

impl Rate {
    /// Creates a rate from a per-unit price
    pub fn new(per_unit: Decimal) -> Self {
        Self(Money::new(per_unit))
    }

    /// Returns the per-unit price
    pub fn per_unit(&self) -> Money {
        self.0
    }

    /// Returns the rate as a raw decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0.amount()
    }

    /// Returns true if the rate is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    /// Prices a quantity of units at this rate
    pub fn apply(&self, units: Decimal) -> Money {
        self.0.multiply(units)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} per unit", self.0)
    }
}
