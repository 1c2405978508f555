//! Period selector
//!
//! Enumerates the selectable years and the twelve month buckets of a year,
//! and works out which period is selected when a session starts.

use chrono::{DateTime, Utc};

use crate::config::{Locale, Settings};
use crate::models::{CalendarZone, PeriodKey};

/// One selectable month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthEntry {
    /// Localized month name
    pub name: &'static str,
    /// First three characters of the name
    pub short: String,
    pub key: PeriodKey,
}

/// Selected year and period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub year: i32,
    pub period: PeriodKey,
}

/// Service for period enumeration and default selection
#[derive(Debug, Clone)]
pub struct PeriodSelector {
    first_year: i32,
    year_count: u32,
    locale: Locale,
    zone: CalendarZone,
}

impl PeriodSelector {
    /// Create a selector over `year_count` consecutive years starting at `first_year`
    ///
    /// A zero count is treated as one year so the range is never empty.
    pub fn new(first_year: i32, year_count: u32, locale: Locale, zone: CalendarZone) -> Self {
        Self {
            first_year,
            year_count: year_count.max(1),
            locale,
            zone,
        }
    }

    /// Build a selector from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.first_selectable_year,
            settings.selectable_year_count,
            settings.locale,
            settings.calendar_zone().unwrap_or_default(),
        )
    }

    /// Selectable years in ascending order
    pub fn list_years(&self) -> Vec<i32> {
        (0..self.year_count as i32)
            .map(|offset| self.first_year + offset)
            .collect()
    }

    /// Earliest selectable year
    pub fn first_year(&self) -> i32 {
        self.first_year
    }

    pub fn is_selectable(&self, year: i32) -> bool {
        year >= self.first_year && year < self.first_year + self.year_count as i32
    }

    /// The twelve months of `year`, January through December
    pub fn list_months(&self, year: i32) -> Vec<MonthEntry> {
        self.locale
            .month_names()
            .iter()
            .zip(1u32..)
            .filter_map(|(name, month)| {
                PeriodKey::new(month, year).map(|key| MonthEntry {
                    name: *name,
                    short: name.chars().take(3).collect(),
                    key,
                })
            })
            .collect()
    }

    /// Period containing `now` in the configured calendar zone
    pub fn current_period_key(&self, now: DateTime<Utc>) -> PeriodKey {
        self.zone.period_of(&now)
    }

    /// Initial selection for a session started at `now`.
    ///
    /// The current year is used when selectable; otherwise the earliest
    /// selectable year. The month is always the current calendar month, even
    /// when combined with the fallback year.
    pub fn default_selection(&self, now: DateTime<Utc>) -> Selection {
        let current = self.current_period_key(now);
        let year = if self.is_selectable(current.year()) {
            current.year()
        } else {
            self.first_year
        };

        Selection {
            year,
            period: current.with_year(year),
        }
    }
}
