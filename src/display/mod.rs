//! Display formatting for terminal output
//!
//! Every function returns a `String`; printing is left to the CLI handlers.

pub mod expense;
pub mod format;
pub mod period;
pub mod summary;

pub use expense::{format_expense_history, format_expense_row};
pub use period::{format_month_list, format_month_strip, format_year_list};
pub use summary::{
    format_alert, format_budget_header, format_consolidated, format_group_detail,
    format_period_title, format_summary,
};
