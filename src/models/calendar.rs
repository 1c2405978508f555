//! Calendar interpretation of stored timestamps
//!
//! Expenses are stored with UTC timestamps. Which month an expense belongs to
//! depends on the zone the timestamp is read in, so that zone is explicit
//! configuration rather than ambient host state. Two expenses read under
//! different zones can land in different months near a month boundary.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::period::PeriodKey;

/// Zone used to turn timestamps into calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarZone {
    /// The host's local time zone
    #[default]
    HostLocal,
    /// A fixed UTC offset
    Fixed(FixedOffset),
}

impl CalendarZone {
    /// Build a zone from an optional offset in minutes east of UTC.
    ///
    /// Returns `None` for offsets chrono cannot represent (beyond ±24h).
    pub fn from_offset_minutes(minutes: Option<i32>) -> Option<Self> {
        match minutes {
            None => Some(Self::HostLocal),
            Some(m) => m
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .map(Self::Fixed),
        }
    }

    /// Wall-clock date and time of `at` in this zone
    pub fn local_date_time(&self, at: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::HostLocal => at.with_timezone(&Local).naive_local(),
            Self::Fixed(offset) => at.with_timezone(offset).naive_local(),
        }
    }

    /// Calendar date of `at` in this zone
    pub fn local_date(&self, at: &DateTime<Utc>) -> NaiveDate {
        self.local_date_time(at).date()
    }

    /// The period bucket `at` falls into
    pub fn period_of(&self, at: &DateTime<Utc>) -> PeriodKey {
        PeriodKey::containing(self.local_date(at))
    }

    /// Convert a wall-clock time in this zone back to UTC
    ///
    /// Ambiguous local times (DST fall-back) resolve to the earlier instant;
    /// nonexistent ones (DST gap) yield `None`.
    pub fn to_utc(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Self::HostLocal => Local
                .from_local_datetime(&local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Self::Fixed(offset) => offset
                .from_local_datetime(&local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Timestamp used for expenses recorded against a period other than now:
    /// the 15th of the month at 12:00 local time.
    pub fn mid_month(&self, period: PeriodKey) -> Option<DateTime<Utc>> {
        let local = NaiveDate::from_ymd_opt(period.year(), period.month(), 15)?
            .and_hms_opt(12, 0, 0)?;
        self.to_utc(local)
    }
}

/// Source of "now"
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock of the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
