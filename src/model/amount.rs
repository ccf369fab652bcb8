//! Amount type for handling monetary values in euros.
//!
//! This module provides the `Amount` type which wraps `Decimal` so that sums over many
//! transactions do not accumulate binary floating point error.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::de::Visitor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

/// Represents a euro amount.
///
/// Displays with two decimals and a trailing euro sign, the way the planner shows money.
///
/// # Examples
///
/// ```
/// # use pocketplan::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("12,5 €").unwrap();
/// assert_eq!(amount.to_string(), "12.50 €");
/// ```
///
/// Equality is numeric:
/// ```
/// # use pocketplan::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("5").unwrap();
/// let b = Amount::from_str("5.00").unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is negative. Zero is neither positive nor negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    /// Returns true if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Returns `self`, or zero if `self` is negative.
    pub fn at_least_zero(self) -> Self {
        if self.is_negative() {
            Self::ZERO
        } else {
            self
        }
    }

    /// Returns `self / total * 100`, or zero when `total` is zero.
    pub fn percent_of(self, total: Amount) -> Decimal {
        if total.is_zero() {
            return Decimal::ZERO;
        }
        // checked_div only fails on overflow, which needs amounts far beyond any budget
        self.0
            .checked_div(total.0)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Accepts `12.50`, `12,50`, `12.50 €`, `€12.50` and an empty string (zero).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Amount::ZERO);
        }

        let without_euro = trimmed
            .strip_suffix('€')
            .or_else(|| trimmed.strip_prefix('€'))
            .unwrap_or(trimmed)
            .trim();

        // A lone comma is a German decimal separator
        let normalized = if without_euro.contains(',') && !without_euro.contains('.') {
            without_euro.replace(',', ".")
        } else {
            without_euro.replace(',', "")
        };

        let value = Decimal::from_str(&normalized).map_err(AmountError)?;
        Ok(Amount(value))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} €", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Numeric columns come back from the backend as strings, keep that shape
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a string or a number")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Amount::from_str(v).map_err(E::custom)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Decimal::from_f64(v)
            .map(Amount)
            .ok_or_else(|| E::custom(format!("{v} cannot be represented as an amount")))
    }
}

impl JsonSchema for Amount {
    fn schema_name() -> Cow<'static, str> {
        "Amount".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": ["string", "number"],
            "description": "A euro amount, e.g. \"12.50\""
        })
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

// Stored data is not range checked, so sums saturate at the Decimal limits instead of panicking.

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Self::Output {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
