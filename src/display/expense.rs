//! Expense history formatting

use crate::config::Locale;
use crate::models::{CalendarZone, Expense};

use super::format::{pad_left, pad_right, separator, truncate};

/// Format a single expense as a history row
pub fn format_expense_row(expense: &Expense, zone: &CalendarZone, locale: Locale) -> String {
    format!(
        "{} {} {} {}",
        pad_right(&locale.format_date(zone.local_date(&expense.date)), 10),
        expense.id,
        pad_right(&truncate(&expense.description, 28), 28),
        pad_left(&locale.format_money(expense.amount), 14)
    )
}

/// Format the period's expenses, newest first
pub fn format_expense_history(
    expenses: &[&Expense],
    zone: &CalendarZone,
    locale: Locale,
) -> String {
    if expenses.is_empty() {
        return match locale {
            Locale::PtBr => "Nenhum gasto registrado este mês.\n".to_string(),
            Locale::EnUs => "No expenses recorded this month.\n".to_string(),
        };
    }

    let (date, id, description, amount) = match locale {
        Locale::PtBr => ("Data", "ID", "Descrição", "Valor"),
        Locale::EnUs => ("Date", "ID", "Description", "Amount"),
    };

    let mut output = String::new();
    output.push_str(&format!(
        "{} {} {} {}\n",
        pad_right(date, 10),
        pad_right(id, 12),
        pad_right(description, 28),
        pad_left(amount, 14)
    ));
    output.push_str(&separator(67));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, zone, locale));
        output.push('\n');
    }

    output
}
