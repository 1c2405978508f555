//! Period key representation
//!
//! A period is one calendar month of one year. Its canonical text form is a
//! two-digit month and four-digit year joined by a slash (`"03/2027"`), which
//! is also the key used for budgets in storage.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

/// A (month, year) bucket
///
/// Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    /// Create a period key, returning `None` if `month` is outside 1..=12
    pub fn new(month: u32, year: i32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The period containing a calendar date
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Same month number in a different year
    pub fn with_year(&self, year: i32) -> Self {
        Self {
            year,
            month: self.month,
        }
    }

    /// Check whether a calendar date falls in this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

impl FromStr for PeriodKey {
    type Err = PeriodKeyParseError;

    /// Parse `"MM/YYYY"`; a single-digit month (`"3/2027"`) is also accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (month, year) = s
            .split_once('/')
            .ok_or_else(|| PeriodKeyParseError::InvalidFormat(s.to_string()))?;

        let month: u32 = month
            .parse()
            .map_err(|_| PeriodKeyParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodKeyParseError::InvalidFormat(s.to_string()))?;

        Self::new(month, year).ok_or(PeriodKeyParseError::InvalidMonth(month))
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PeriodKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for period key parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodKeyParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodKeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKeyParseError::InvalidFormat(s) => {
                write!(f, "Invalid period format (expected MM/YYYY): {}", s)
            }
            PeriodKeyParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodKeyParseError {}
