//! Expense CLI commands
//!
//! Add, delete and list expenses of the selected period, plus the
//! consolidated views built from them.

use crate::config::Settings;
use crate::display::{
    format_alert, format_expense_history, format_group_detail, format_period_title,
    format_summary,
};
use crate::error::{MoneyflowError, MoneyflowResult};
use crate::models::{Money, MAX_AMOUNT_CENTS};
use crate::services::Session;

use super::report_write_failure;

/// Record an expense from masked amount input and description words
pub fn handle_add_command(
    session: &mut Session,
    settings: &Settings,
    amount: &str,
    description: &[String],
) -> MoneyflowResult<()> {
    let locale = settings.locale;
    let amount = Money::from_masked_input(amount);
    let description = description.join(" ");

    let expense = session.add_expense(amount, &description).ok_or_else(|| {
        MoneyflowError::Validation(format!(
            "Expense needs a positive amount up to {} and a non-empty description",
            Money::from_cents(MAX_AMOUNT_CENTS)
        ))
    })?;

    println!(
        "{} {}  {}  {}",
        expense.id,
        expense.description,
        locale.format_money(expense.amount),
        format_period_title(session.selected_period(), locale)
    );

    if let Some(alert) = format_alert(&session.summary().status, locale) {
        println!("{}", alert);
    }
    report_write_failure(session, locale);
    Ok(())
}

/// Delete an expense by full or short ID
pub fn handle_delete_command(
    session: &mut Session,
    settings: &Settings,
    reference: &str,
) -> MoneyflowResult<()> {
    let id = session.find_expense(reference)?;
    if !session.delete_expense(id) {
        return Err(MoneyflowError::expense_not_found(reference));
    }

    println!("Deleted {}", id);
    report_write_failure(session, settings.locale);
    Ok(())
}

/// Show the selected period's expenses, newest first
pub fn handle_list_command(session: &Session, settings: &Settings) {
    let locale = settings.locale;
    println!("{}", format_period_title(session.selected_period(), locale));
    print!(
        "{}",
        format_expense_history(&session.period_expenses(), session.zone(), locale)
    );
}

/// Show budget header, alert and consolidated table
pub fn handle_summary_command(session: &Session, settings: &Settings) {
    print!("{}", format_summary(&session.summary(), settings.locale));
}

/// Show the expenses behind one consolidated description
pub fn handle_group_command(session: &Session, settings: &Settings, description: &[String]) {
    let label = description.join(" ");
    let label = label.trim();
    let entries = session.group_detail(label);
    print!(
        "{}",
        format_group_detail(label, &entries, session.zone(), settings.locale)
    );
}

/// Print description suggestions, one per line
pub fn handle_suggest_command(session: &Session, query: &[String]) {
    for suggestion in session.suggestions(&query.join(" ")) {
        println!("{}", suggestion);
    }
}
