//! Period selection arguments and commands

use clap::Args;

use crate::config::Settings;
use crate::display::{format_month_list, format_month_strip, format_period_title, format_year_list};
use crate::error::{MoneyflowError, MoneyflowResult};
use crate::models::PeriodKey;
use crate::services::Session;

/// Which period a command works on; defaults to the current month
#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Period as MM/YYYY (e.g., "03/2027")
    #[arg(long, global = true, value_name = "MM/YYYY", conflicts_with_all = ["year", "month"])]
    pub period: Option<PeriodKey>,

    /// Year; keeps the current month unless --month is given
    #[arg(long, global = true)]
    pub year: Option<i32>,

    /// Month number (1-12) of the selected year
    #[arg(long, global = true)]
    pub month: Option<u32>,
}

/// Apply the period arguments to the session's selection
pub fn apply_period_args(session: &mut Session, args: &PeriodArgs) -> MoneyflowResult<()> {
    if let Some(period) = args.period {
        if !session.select_period(period) {
            return Err(out_of_range(session, period.year()));
        }
        return Ok(());
    }

    if let Some(year) = args.year {
        if !session.select_year(year) {
            return Err(out_of_range(session, year));
        }
    }

    if let Some(month) = args.month {
        if !session.select_month(month) {
            return Err(MoneyflowError::Validation(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
    }

    Ok(())
}

fn out_of_range(session: &Session, year: i32) -> MoneyflowError {
    let years = session.selector().list_years();
    let last = years.last().copied().unwrap_or(year);
    MoneyflowError::Validation(format!(
        "Year {} is not selectable (available: {}-{})",
        year,
        session.selector().first_year(),
        last
    ))
}

/// Show the months of the selected year
pub fn handle_periods_command(session: &Session, settings: &Settings, list: bool) {
    let selection = session.selection();
    let months = session.selector().list_months(selection.year);

    println!("{}", format_period_title(selection.period, settings.locale));
    if list {
        print!("{}", format_month_list(&months, selection.period));
    } else {
        print!("{}", format_month_strip(&months, selection.period));
    }
}

/// Show the selectable years
pub fn handle_years_command(session: &Session) {
    let years = session.selector().list_years();
    print!("{}", format_year_list(&years, session.selection().year));
}
