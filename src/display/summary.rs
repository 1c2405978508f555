//! Budget header, alerts and consolidated spending

use crate::config::Locale;
use crate::models::{CalendarZone, Expense, PeriodKey};
use crate::services::{BudgetStatus, ConsolidatedGroup, PeriodSummary, UtilizationTier};

use super::format::{pad_left, pad_right, progress_bar, separator, truncate, whole_percent};

const BAR_WIDTH: usize = 40;
const TABLE_WIDTH: usize = 48;

/// Month name and year, e.g. "Março 2027"
pub fn format_period_title(period: PeriodKey, locale: Locale) -> String {
    format!("{} {}", locale.month_name(period.month()), period.year())
}

/// Limit, remaining balance, spending and the progress bar
pub fn format_budget_header(status: &BudgetStatus, period: PeriodKey, locale: Locale) -> String {
    let (budget, remaining, spent, used) = match locale {
        Locale::PtBr => ("Orçamento Mensal", "Saldo Restante", "Total Gasto", "utilizado"),
        Locale::EnUs => ("Monthly Budget", "Remaining Balance", "Total Spent", "used"),
    };

    let mut output = String::new();
    output.push_str(&format!("{}\n", format_period_title(period, locale)));
    output.push_str(&format!("{}\n", separator(TABLE_WIDTH)));
    output.push_str(&format!("{:18} {}\n", budget, locale.format_money(status.limit)));
    output.push_str(&format!("{:18} {}\n", remaining, locale.format_money(status.balance)));
    output.push_str(&format!(
        "{:18} {}  ({}% {})\n",
        spent,
        locale.format_money(status.spent),
        whole_percent(status.percent),
        used
    ));
    output.push_str(&format!("[{}]\n", progress_bar(status.percent, BAR_WIDTH)));
    output
}

/// Alert line for the period, if utilization warrants one
pub fn format_alert(status: &BudgetStatus, locale: Locale) -> Option<String> {
    let percent = whole_percent(status.percent);
    let text = match (status.alert()?, locale) {
        (UtilizationTier::Critical, Locale::PtBr) => {
            format!("LIMITE CRÍTICO: {}% utilizado!", percent)
        }
        (UtilizationTier::Critical, Locale::EnUs) => format!("CRITICAL LIMIT: {}% used!", percent),
        (UtilizationTier::Warning { .. }, Locale::PtBr) => {
            format!("ALERTA: {}% do orçamento consumido!", percent)
        }
        (UtilizationTier::Warning { .. }, Locale::EnUs) => {
            format!("ALERT: {}% of budget consumed!", percent)
        }
        (UtilizationTier::Normal, _) => return None,
    };

    let marker = match status.tier {
        UtilizationTier::Critical => "!!!",
        UtilizationTier::Warning { extreme: true } => "!!",
        _ => "!",
    };
    Some(format!("{} {}", marker, text))
}

/// Consolidated groups as "label  count  total" rows; empty when there are none
pub fn format_consolidated(groups: &[ConsolidatedGroup], locale: Locale) -> String {
    if groups.is_empty() {
        return String::new();
    }

    let (title, description, count, total) = match locale {
        Locale::PtBr => ("Gastos Consolidados", "Descrição", "Qtd", "Total"),
        Locale::EnUs => ("Consolidated Expenses", "Description", "Count", "Total"),
    };

    let mut output = String::new();
    output.push_str(&format!("{}\n", title));
    output.push_str(&format!(
        "{} {} {}\n",
        pad_right(description, 26),
        pad_left(count, 5),
        pad_left(total, 15)
    ));
    output.push_str(&format!("{}\n", separator(TABLE_WIDTH)));

    for group in groups {
        output.push_str(&format!(
            "{} {} {}\n",
            pad_right(&truncate(&group.description, 26), 26),
            pad_left(&format!("{}x", group.count), 5),
            pad_left(&locale.format_money(group.total), 15)
        ));
    }

    output
}

/// The expenses behind one consolidated label
pub fn format_group_detail(
    label: &str,
    entries: &[&Expense],
    zone: &CalendarZone,
    locale: Locale,
) -> String {
    if entries.is_empty() {
        return match locale {
            Locale::PtBr => format!("Nenhum gasto encontrado para \"{}\".\n", label),
            Locale::EnUs => format!("No expenses found for \"{}\".\n", label),
        };
    }

    let mut output = String::new();
    output.push_str(&format!("{} ({}x)\n", label, entries.len()));
    output.push_str(&format!("{}\n", separator(32)));
    for expense in entries {
        output.push_str(&format!(
            "  {} {}\n",
            pad_right(&locale.format_date_time(zone.local_date_time(&expense.date)), 16),
            pad_left(&locale.format_money(expense.amount), 14)
        ));
    }
    output
}

/// Header, alert and consolidated table together
pub fn format_summary(summary: &PeriodSummary, locale: Locale) -> String {
    let mut output = format_budget_header(&summary.status, summary.period, locale);

    if let Some(alert) = format_alert(&summary.status, locale) {
        output.push('\n');
        output.push_str(&alert);
        output.push('\n');
    }

    let table = format_consolidated(&summary.groups, locale);
    if !table.is_empty() {
        output.push('\n');
        output.push_str(&table);
    }

    output
}
