//! Expense classifier
//!
//! Decides which month bucket an expense belongs to by reading its timestamp
//! in the configured calendar zone.

use crate::models::{CalendarZone, Expense, PeriodKey};

/// Check whether `expense` falls in `period` when read in `zone`
pub fn belongs_to_period(expense: &Expense, period: PeriodKey, zone: &CalendarZone) -> bool {
    period.contains(zone.local_date(&expense.date))
}
