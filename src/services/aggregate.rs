//! Expense aggregation
//!
//! Filters expenses down to a period, totals them, and consolidates them by
//! normalized description into (label, total, count) groups.

use std::collections::{BTreeSet, HashMap};

use crate::models::{normalize_description, CalendarZone, Expense, Money, PeriodKey};

use super::classifier::belongs_to_period;

/// Expenses sharing one normalized description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedGroup {
    /// Normalized description with its first character upper-cased
    pub description: String,
    /// Sum of the group's amounts
    pub total: Money,
    /// Number of expenses in the group
    pub count: usize,
}

/// Expenses in `period`, keeping their input order
pub fn filter_by_period<'a>(
    expenses: &'a [Expense],
    period: PeriodKey,
    zone: &CalendarZone,
) -> Vec<&'a Expense> {
    expenses
        .iter()
        .filter(|expense| belongs_to_period(expense, period, zone))
        .collect()
}

/// Sum of amounts; zero for no expenses
pub fn total_of<'a, I>(expenses: I) -> Money
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses.into_iter().map(|expense| expense.amount).sum()
}

/// Group expenses by trimmed, lowercased description.
///
/// Groups come out by descending total. The sort is stable, so groups with
/// equal totals keep the order in which their first expense was seen.
pub fn consolidate<'a, I>(expenses: I) -> Vec<ConsolidatedGroup>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Money, usize)> = Vec::new();

    for expense in expenses {
        let key = expense.normalized_description();
        match index.get(&key) {
            Some(&i) => {
                groups[i].1 += expense.amount;
                groups[i].2 += 1;
            }
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, expense.amount, 1));
            }
        }
    }

    let mut consolidated: Vec<ConsolidatedGroup> = groups
        .into_iter()
        .map(|(key, total, count)| ConsolidatedGroup {
            description: capitalize_first(&key),
            total,
            count,
        })
        .collect();

    consolidated.sort_by(|a, b| b.total.cmp(&a.total));
    consolidated
}

/// Upper-case the first character, leaving the rest untouched
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Expenses behind one consolidated label, newest first
pub fn group_entries<'a>(expenses: &[&'a Expense], label: &str) -> Vec<&'a Expense> {
    let wanted = label.to_lowercase();
    let mut entries: Vec<&Expense> = expenses
        .iter()
        .copied()
        .filter(|expense| normalize_description(&expense.description) == wanted)
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

/// Every distinct description ever recorded, sorted
pub fn known_descriptions(expenses: &[Expense]) -> Vec<String> {
    expenses
        .iter()
        .map(|expense| expense.description.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Suggestions for a partially typed description.
///
/// Blank input suggests nothing. Otherwise a known description is offered when
/// it contains the input case-insensitively but is not the same text.
pub fn filter_suggestions(known: &[String], input: &str) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    let needle = input.to_lowercase();
    known
        .iter()
        .filter(|candidate| {
            let candidate = candidate.to_lowercase();
            candidate.contains(&needle) && candidate != needle
        })
        .cloned()
        .collect()
}
