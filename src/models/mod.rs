//! Core data models for MoneyFlow
//!
//! This module contains the data structures of the budgeting domain: money,
//! expenses, period keys and the calendar used to bucket timestamps.

pub mod calendar;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;

pub use calendar::{CalendarZone, Clock, FixedClock, SystemClock};
pub use expense::{normalize_description, Expense, ExpenseValidationError};
pub use ids::ExpenseId;
pub use money::{Money, MAX_AMOUNT_CENTS};
pub use period::{PeriodKey, PeriodKeyParseError};
