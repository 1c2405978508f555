//! Month strip and year list

use crate::models::PeriodKey;
use crate::services::MonthEntry;

/// The twelve months of a year on one line, selected month in brackets
pub fn format_month_strip(months: &[MonthEntry], selected: PeriodKey) -> String {
    let cells: Vec<String> = months
        .iter()
        .map(|entry| {
            if entry.key == selected {
                format!("[{}]", entry.short)
            } else {
                format!(" {} ", entry.short)
            }
        })
        .collect();

    format!("{}\n", cells.join(""))
}

/// Months with their period keys, one per line
pub fn format_month_list(months: &[MonthEntry], selected: PeriodKey) -> String {
    let mut output = String::new();
    for entry in months {
        let marker = if entry.key == selected { "*" } else { " " };
        output.push_str(&format!("{} {}  {}\n", marker, entry.key, entry.name));
    }
    output
}

/// Selectable years, selected one marked
pub fn format_year_list(years: &[i32], selected: i32) -> String {
    let mut output = String::new();
    for year in years {
        let marker = if *year == selected { "*" } else { " " };
        output.push_str(&format!("{} {}\n", marker, year));
    }
    output
}
