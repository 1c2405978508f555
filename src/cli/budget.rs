//! Budget CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_alert, format_budget_header, format_period_title};
use crate::error::MoneyflowResult;
use crate::services::Session;

use super::report_write_failure;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the spending limit of the selected period
    Set {
        /// Amount as typed digits; the last two are cents (e.g., "100000" = 1000.00)
        amount: String,
    },

    /// Show the limit and utilization of the selected period
    Show,
}

/// Handle a budget command
pub fn handle_budget_command(
    session: &mut Session,
    settings: &Settings,
    cmd: BudgetCommands,
) -> MoneyflowResult<()> {
    let locale = settings.locale;

    match cmd {
        BudgetCommands::Set { amount } => {
            let stored = session.set_budget(&amount);
            println!(
                "{}: {}",
                format_period_title(session.selected_period(), locale),
                locale.format_money(stored)
            );
            report_write_failure(session, locale);
        }
        BudgetCommands::Show => {
            let summary = session.summary();
            print!("{}", format_budget_header(&summary.status, summary.period, locale));
            if let Some(alert) = format_alert(&summary.status, locale) {
                println!("{}", alert);
            }
        }
    }

    Ok(())
}
