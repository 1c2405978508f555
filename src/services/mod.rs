//! Service layer for MoneyFlow
//!
//! Period selection, expense aggregation and budget math sit on top of the
//! models; `Session` ties them to storage and owns the running state.

pub mod aggregate;
pub mod classifier;
pub mod ledger;
pub mod period;
pub mod session;

pub use aggregate::{
    consolidate, filter_by_period, filter_suggestions, group_entries, known_descriptions,
    total_of, ConsolidatedGroup,
};
pub use classifier::belongs_to_period;
pub use ledger::{balance, percent_utilized, BudgetLedger, BudgetStatus, UtilizationTier};
pub use period::{MonthEntry, PeriodSelector, Selection};
pub use session::{PeriodSummary, Session};
