//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Serialized as a decimal number of currency units (`12.5`), so stored
//! data reads the same way a person would write it. Arithmetic saturates
//! instead of overflowing.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Largest amount accepted from user input or storage: 13 digits of cents
pub const MAX_AMOUNT_CENTS: i64 = 9_999_999_999_999;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use moneyflow::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units and cents
    pub const fn from_units_cents(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Whether the magnitude is within [`MAX_AMOUNT_CENTS`]
    pub const fn is_within_limit(&self) -> bool {
        self.0 >= -MAX_AMOUNT_CENTS && self.0 <= MAX_AMOUNT_CENTS
    }

    /// Clamp the magnitude to [`MAX_AMOUNT_CENTS`]
    pub fn capped(&self) -> Self {
        Self(self.0.clamp(-MAX_AMOUNT_CENTS, MAX_AMOUNT_CENTS))
    }

    /// Amount in currency units as a float, for serialization only
    fn as_units_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Interpret masked currency input as a number of cents.
    ///
    /// Every non-digit character is discarded and the remaining digit stream is
    /// read as a count of cents, so `"1250"` and `"12,50"` both become 12.50.
    /// Empty input yields zero. Absurdly long digit streams saturate instead of
    /// wrapping.
    ///
    /// # Examples
    /// ```
    /// use moneyflow::models::Money;
    /// assert_eq!(Money::from_masked_input("R$ 1.234,56").cents(), 123456);
    /// assert!(Money::from_masked_input("").is_zero());
    /// ```
    pub fn from_masked_input(input: &str) -> Self {
        let cents = input
            .chars()
            .filter_map(|c| c.to_digit(10))
            .fold(0i64, |acc, d| {
                acc.saturating_mul(10).saturating_add(i64::from(d))
            });
        Self(cents)
    }

    /// Format with explicit separators, grouping whole units in thousands
    ///
    /// `format_grouped(".", ",")` renders 123456 cents as `1.234,56`.
    pub fn format_grouped(&self, thousands_sep: &str, decimal_sep: &str) -> String {
        let digits = self.units().abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push_str(thousands_sep);
            }
            grouped.push(ch);
        }

        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}{:02}", sign, grouped, decimal_sep, self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_units_f64())
    }
}

struct MoneyVisitor;

impl MoneyVisitor {
    fn from_cents<E: de::Error>(cents: Option<i64>) -> Result<Money, E> {
        match cents {
            Some(cents) if Money(cents).is_within_limit() => Ok(Money(cents)),
            _ => Err(E::custom("amount out of range")),
        }
    }
}

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a decimal amount of currency units")
    }

    fn visit_i64<E: de::Error>(self, units: i64) -> Result<Money, E> {
        Self::from_cents(units.checked_mul(100))
    }

    fn visit_u64<E: de::Error>(self, units: u64) -> Result<Money, E> {
        Self::from_cents(i64::try_from(units).ok().and_then(|u| u.checked_mul(100)))
    }

    fn visit_f64<E: de::Error>(self, units: f64) -> Result<Money, E> {
        let cents = (units * 100.0).round();
        if !cents.is_finite() || cents.abs() > MAX_AMOUNT_CENTS as f64 {
            return Err(E::custom("amount out of range"));
        }
        Ok(Money(cents as i64))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}
