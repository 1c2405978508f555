//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the session.

pub mod advise;
pub mod budget;
pub mod expense;
pub mod period;

pub use advise::handle_advise_command;
pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{
    handle_add_command, handle_delete_command, handle_group_command, handle_list_command,
    handle_suggest_command, handle_summary_command,
};
pub use period::{apply_period_args, handle_periods_command, handle_years_command, PeriodArgs};

use crate::config::Locale;
use crate::services::Session;

/// Warn on stderr when the last change could not be saved
pub(crate) fn report_write_failure(session: &Session, locale: Locale) {
    if session.last_write_failed() {
        match locale {
            Locale::PtBr => eprintln!("Aviso: não foi possível salvar a alteração."),
            Locale::EnUs => eprintln!("Warning: the change could not be saved."),
        }
    }
}
