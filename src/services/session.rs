//! Application session
//!
//! Owns the expense list, the budget ledger and the current period selection
//! for the lifetime of the process. Every user action goes through one method
//! here; methods that change a collection write that collection back to
//! storage before returning.

use tracing::{debug, info, warn};

use crate::advisory::AdvisoryRequest;
use crate::config::Settings;
use crate::error::{MoneyflowError, MoneyflowResult};
use crate::models::{CalendarZone, Clock, Expense, ExpenseId, Money, PeriodKey};
use crate::storage::Storage;

use super::aggregate::{
    consolidate, filter_by_period, filter_suggestions, group_entries, known_descriptions,
    total_of, ConsolidatedGroup,
};
use super::ledger::{BudgetLedger, BudgetStatus};
use super::period::{PeriodSelector, Selection};

/// Everything shown for the selected period
#[derive(Debug, Clone)]
pub struct PeriodSummary {
    pub period: PeriodKey,
    pub status: BudgetStatus,
    pub groups: Vec<ConsolidatedGroup>,
    pub expense_count: usize,
}

/// Process-wide application state
pub struct Session {
    storage: Storage,
    expenses: Vec<Expense>,
    budgets: BudgetLedger,
    selector: PeriodSelector,
    zone: CalendarZone,
    clock: Box<dyn Clock>,
    selection: Selection,
    last_write_failed: bool,
}

impl Session {
    /// Load persisted state and pick the default selection
    pub fn load(
        storage: Storage,
        settings: &Settings,
        clock: Box<dyn Clock>,
    ) -> MoneyflowResult<Self> {
        let zone = settings.calendar_zone().ok_or_else(|| {
            MoneyflowError::Config(format!(
                "utc_offset_minutes out of range: {:?}",
                settings.utc_offset_minutes
            ))
        })?;
        let selector = PeriodSelector::from_settings(settings);
        let expenses = storage.load_expenses()?;
        let budgets = storage.load_budgets()?;
        let selection = selector.default_selection(clock.now());

        debug!(
            expenses = expenses.len(),
            budgets = budgets.len(),
            period = %selection.period,
            "Session loaded"
        );

        Ok(Self {
            storage,
            expenses,
            budgets,
            selector,
            zone,
            clock,
            selection,
            last_write_failed: false,
        })
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_period(&self) -> PeriodKey {
        self.selection.period
    }

    pub fn selector(&self) -> &PeriodSelector {
        &self.selector
    }

    pub fn zone(&self) -> &CalendarZone {
        &self.zone
    }

    /// All expenses, newest first
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn budgets(&self) -> &BudgetLedger {
        &self.budgets
    }

    /// Whether the most recent write to storage failed
    ///
    /// In-memory state stays authoritative either way; a failed write only
    /// means the change may be gone after a restart.
    pub fn last_write_failed(&self) -> bool {
        self.last_write_failed
    }

    /// Switch to `year`, keeping the selected month. Unselectable years are ignored.
    pub fn select_year(&mut self, year: i32) -> bool {
        if !self.selector.is_selectable(year) {
            debug!(year, "Ignoring unselectable year");
            return false;
        }
        self.selection = Selection {
            year,
            period: self.selection.period.with_year(year),
        };
        true
    }

    /// Switch to `month` of the selected year
    pub fn select_month(&mut self, month: u32) -> bool {
        match PeriodKey::new(month, self.selection.year) {
            Some(period) => {
                self.selection.period = period;
                true
            }
            None => false,
        }
    }

    /// Switch to a full period; its year must be selectable
    pub fn select_period(&mut self, period: PeriodKey) -> bool {
        if !self.selector.is_selectable(period.year()) {
            debug!(period = %period, "Ignoring period outside selectable years");
            return false;
        }
        self.selection = Selection {
            year: period.year(),
            period,
        };
        true
    }

    /// Record an expense against the selected period.
    ///
    /// Returns `None` without changing anything when the amount is not
    /// positive or the description is blank. The expense is stamped with the
    /// current time when the selected period is the current one, otherwise
    /// with noon on the 15th of the selected month.
    pub fn add_expense(&mut self, amount: Money, description: &str) -> Option<Expense> {
        let date = self.timestamp_for_selection();
        let expense = match Expense::new(amount, description, date) {
            Ok(expense) => expense,
            Err(e) => {
                debug!(error = %e, "Rejected expense input");
                return None;
            }
        };

        self.expenses.insert(0, expense.clone());
        info!(id = %expense.id, amount = %expense.amount, period = %self.selection.period, "Expense added");
        self.persist_expenses();
        Some(expense)
    }

    /// Remove an expense; returns whether it existed
    pub fn delete_expense(&mut self, id: ExpenseId) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|expense| expense.id != id);
        let removed = self.expenses.len() != before;

        if removed {
            info!(id = %id, "Expense deleted");
            self.persist_expenses();
        }
        removed
    }

    /// Resolve a full or shortened expense ID among all expenses
    pub fn find_expense(&self, reference: &str) -> MoneyflowResult<ExpenseId> {
        let mut matches = self
            .expenses
            .iter()
            .filter(|expense| expense.id.matches(reference));

        match (matches.next(), matches.next()) {
            (Some(expense), None) => Ok(expense.id),
            (Some(_), Some(_)) => Err(MoneyflowError::Validation(format!(
                "Expense reference '{}' is ambiguous; use more characters",
                reference
            ))),
            (None, _) => Err(MoneyflowError::expense_not_found(reference)),
        }
    }

    /// Store the selected period's limit from masked currency input
    pub fn set_budget(&mut self, input: &str) -> Money {
        let period = self.selection.period;
        let stored = self.budgets.set_limit_from_input(period, input);
        info!(period = %period, limit = %stored, "Budget updated");
        self.persist_budgets();
        stored
    }

    /// Limit of the selected period
    pub fn current_limit(&self) -> Money {
        self.budgets.limit_for(self.selection.period)
    }

    /// Expenses of the selected period, newest first
    pub fn period_expenses(&self) -> Vec<&Expense> {
        filter_by_period(&self.expenses, self.selection.period, &self.zone)
    }

    /// Budget status and consolidation for the selected period
    pub fn summary(&self) -> PeriodSummary {
        let expenses = self.period_expenses();
        let spent = total_of(expenses.iter().copied());
        PeriodSummary {
            period: self.selection.period,
            status: BudgetStatus::new(self.current_limit(), spent),
            groups: consolidate(expenses.iter().copied()),
            expense_count: expenses.len(),
        }
    }

    /// Expenses of the selected period behind one consolidated label
    pub fn group_detail(&self, label: &str) -> Vec<&Expense> {
        group_entries(&self.period_expenses(), label)
    }

    /// Description suggestions drawn from every recorded expense
    pub fn suggestions(&self, input: &str) -> Vec<String> {
        filter_suggestions(&known_descriptions(&self.expenses), input)
    }

    /// Every distinct description recorded so far
    pub fn known_descriptions(&self) -> Vec<String> {
        known_descriptions(&self.expenses)
    }

    /// Summary to send to the advisor.
    ///
    /// `None` when the selected period has no expenses, which also covers the
    /// case where both budget and spending are zero.
    pub fn advisory_request(&self) -> Option<AdvisoryRequest> {
        let summary = self.summary();
        if summary.expense_count == 0 {
            return None;
        }
        if summary.status.limit.is_zero() && summary.status.spent.is_zero() {
            return None;
        }
        Some(AdvisoryRequest::new(
            summary.status.limit,
            summary.status.spent,
            summary.groups,
        ))
    }

    fn timestamp_for_selection(&self) -> chrono::DateTime<chrono::Utc> {
        let now = self.clock.now();
        let period = self.selection.period;
        if period == self.selector.current_period_key(now) {
            return now;
        }
        match self.zone.mid_month(period) {
            Some(stamp) => stamp,
            None => {
                warn!(period = %period, "No valid mid-month time; using now");
                now
            }
        }
    }

    fn persist_expenses(&mut self) {
        let result = self.storage.save_expenses(&self.expenses);
        self.record_write("expenses", result);
    }

    fn persist_budgets(&mut self) {
        let result = self.storage.save_budgets(&self.budgets);
        self.record_write("budgets", result);
    }

    fn record_write(&mut self, collection: &str, result: MoneyflowResult<()>) {
        match result {
            Ok(()) => self.last_write_failed = false,
            Err(e) => {
                warn!(collection, error = %e, "Failed to persist; keeping in-memory state");
                self.last_write_failed = true;
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("expenses", &self.expenses.len())
            .field("budgets", &self.budgets.len())
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FixedClock;
    use crate::services::ledger::UtilizationTier;
    use crate::storage::{KeyValueStore, MemoryStore};
    use chrono::{DateTime, TimeZone, Utc};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Memory store whose contents stay visible to the test after handing it over
    #[derive(Clone, Default)]
    struct SharedStore {
        entries: Rc<RefCell<HashMap<String, String>>>,
        fail_writes: bool,
    }

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> MoneyflowResult<Option<String>> {
            Ok(self.entries.borrow().get(key).cloned())
        }

        fn set(&mut self, key: &str, value: &str) -> MoneyflowResult<()> {
            if self.fail_writes {
                return Err(MoneyflowError::Storage("disk full".into()));
            }
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2027, 3, 20, 14, 30, 0).unwrap()
    }

    fn settings() -> Settings {
        Settings {
            utc_offset_minutes: Some(-180),
            ..Settings::default()
        }
    }

    fn session_with(store: Box<dyn KeyValueStore>, at: DateTime<Utc>) -> Session {
        Session::load(Storage::new(store), &settings(), Box::new(FixedClock(at))).unwrap()
    }

    fn session() -> Session {
        session_with(Box::new(MemoryStore::new()), now())
    }

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn test_default_selection_is_current_period() {
        let session = session();
        assert_eq!(session.selected_period(), PeriodKey::new(3, 2027).unwrap());
        assert_eq!(session.selection().year, 2027);
    }

    #[test]
    fn test_default_selection_falls_back_when_year_out_of_range() {
        let at = Utc.with_ymd_and_hms(2025, 10, 18, 15, 0, 0).unwrap();
        let session = session_with(Box::new(MemoryStore::new()), at);
        assert_eq!(session.selection().year, 2026);
        assert_eq!(session.selected_period(), PeriodKey::new(10, 2026).unwrap());
    }

    #[test]
    fn test_add_expense_in_current_period_uses_now() {
        let mut session = session();
        let expense = session.add_expense(cents(1250), "  Padaria ").unwrap();
        assert_eq!(expense.date, now());
        assert_eq!(expense.description, "Padaria");
        assert_eq!(session.expenses()[0].id, expense.id);
    }

    #[test]
    fn test_add_expense_in_other_period_uses_mid_month() {
        let mut session = session();
        assert!(session.select_month(7));
        let expense = session.add_expense(cents(1250), "Padaria").unwrap();

        // Noon on July 15th at UTC-3
        assert_eq!(expense.date, Utc.with_ymd_and_hms(2027, 7, 15, 15, 0, 0).unwrap());
        assert_eq!(session.period_expenses().len(), 1);
    }

    #[test]
    fn test_add_expense_prepends() {
        let mut session = session();
        session.add_expense(cents(100), "first").unwrap();
        session.add_expense(cents(200), "second").unwrap();
        let descriptions: Vec<_> = session
            .expenses()
            .iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["second", "first"]);
    }

    #[test]
    fn test_invalid_input_is_silently_rejected() {
        let store = SharedStore::default();
        let mut session = session_with(Box::new(store.clone()), now());

        assert!(session.add_expense(Money::zero(), "Uber").is_none());
        assert!(session.add_expense(cents(-100), "Uber").is_none());
        assert!(session.add_expense(cents(100), "   ").is_none());
        assert!(session
            .add_expense(Money::from_masked_input(&"9".repeat(40)), "Uber")
            .is_none());
        assert!(session.expenses().is_empty());
        assert!(store.entries.borrow().is_empty());
    }

    #[test]
    fn test_add_then_delete_restores_prior_state() {
        let mut session = session();
        session.add_expense(cents(5000), "Mercado").unwrap();
        let before_ids: Vec<_> = session.expenses().iter().map(|e| e.id).collect();
        let before_total = session.summary().status.spent;

        let added = session.add_expense(cents(999), "Cinema").unwrap();
        assert!(session.delete_expense(added.id));

        let after_ids: Vec<_> = session.expenses().iter().map(|e| e.id).collect();
        assert_eq!(before_ids, after_ids);
        assert_eq!(session.summary().status.spent, before_total);
        assert!(!session.delete_expense(added.id));
    }

    #[test]
    fn test_mutations_are_persisted() {
        let store = SharedStore::default();
        let mut session = session_with(Box::new(store.clone()), now());

        session.add_expense(cents(50000), "Uber").unwrap();
        session.set_budget("100000");

        let reloaded = session_with(Box::new(store.clone()), now());
        assert_eq!(reloaded.expenses().len(), 1);
        assert_eq!(reloaded.current_limit(), cents(100000));
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let store = SharedStore {
            fail_writes: true,
            ..SharedStore::default()
        };
        let mut session = session_with(Box::new(store), now());

        assert!(session.add_expense(cents(100), "Uber").is_some());
        assert!(session.last_write_failed());
        assert_eq!(session.expenses().len(), 1);
    }

    #[test]
    fn test_select_year_keeps_month() {
        let mut session = session();
        assert!(session.select_year(2029));
        assert_eq!(session.selected_period(), PeriodKey::new(3, 2029).unwrap());

        assert!(!session.select_year(2031));
        assert_eq!(session.selected_period(), PeriodKey::new(3, 2029).unwrap());
    }

    #[test]
    fn test_select_month_uses_selected_year() {
        let mut session = session();
        session.select_year(2028);
        assert!(session.select_month(11));
        assert_eq!(session.selected_period(), PeriodKey::new(11, 2028).unwrap());
        assert!(!session.select_month(13));
    }

    #[test]
    fn test_select_period_sets_year() {
        let mut session = session();
        assert!(session.select_period(PeriodKey::new(1, 2030).unwrap()));
        assert_eq!(session.selection().year, 2030);
        assert!(!session.select_period(PeriodKey::new(1, 2035).unwrap()));
        assert_eq!(session.selection().year, 2030);
    }

    #[test]
    fn test_budget_is_per_period() {
        let mut session = session();
        assert_eq!(session.set_budget("R$ 1.000,00"), cents(100000));
        session.select_month(4);
        assert_eq!(session.current_limit(), Money::zero());
        assert_eq!(session.set_budget(""), Money::zero());
        session.select_month(3);
        assert_eq!(session.current_limit(), cents(100000));
    }

    #[test]
    fn test_summary_scenario() {
        let mut session = session();
        session.set_budget("100000");
        session.add_expense(cents(50000), "Uber").unwrap();
        session.add_expense(cents(30000), "uber").unwrap();
        session.add_expense(cents(5000), "Mercado").unwrap();

        let summary = session.summary();
        assert_eq!(summary.status.spent, cents(85000));
        assert_eq!(summary.status.balance, cents(15000));
        assert_eq!(summary.status.percent, 85.0);
        assert_eq!(summary.status.alert(), Some(UtilizationTier::Warning { extreme: true }));
        assert_eq!(summary.expense_count, 3);

        let groups: Vec<_> = summary
            .groups
            .iter()
            .map(|g| (g.description.as_str(), g.total, g.count))
            .collect();
        assert_eq!(
            groups,
            vec![("Uber", cents(80000), 2), ("Mercado", cents(5000), 1)]
        );
    }

    #[test]
    fn test_summary_other_period_is_empty() {
        let mut session = session();
        session.add_expense(cents(50000), "Uber").unwrap();
        session.select_month(4);

        let summary = session.summary();
        assert_eq!(summary.expense_count, 0);
        assert_eq!(summary.status.spent, Money::zero());
        assert!(summary.groups.is_empty());
    }

    #[test]
    fn test_find_expense_by_short_id() {
        let mut session = session();
        let expense = session.add_expense(cents(100), "Uber").unwrap();

        assert_eq!(session.find_expense(&expense.id.to_string()).unwrap(), expense.id);
        assert!(session.find_expense("exp-zzzzzzzz").unwrap_err().is_not_found());
    }

    #[test]
    fn test_group_detail_and_suggestions() {
        let mut session = session();
        session.add_expense(cents(100), "Uber").unwrap();
        session.add_expense(cents(200), "Uber Eats").unwrap();
        session.add_expense(cents(300), "uber").unwrap();

        let detail = session.group_detail("Uber");
        assert_eq!(detail.len(), 2);
        assert_eq!(session.suggestions("ube"), vec!["Uber", "Uber Eats", "uber"]);
        assert_eq!(session.suggestions("uber"), vec!["Uber Eats"]);
    }

    #[test]
    fn test_advisory_request_needs_expenses() {
        let mut session = session();
        session.set_budget("100000");
        assert!(session.advisory_request().is_none());

        session.add_expense(cents(2500), "Cinema").unwrap();
        let request = session.advisory_request().unwrap();
        assert_eq!(request.budget, cents(100000));
        assert_eq!(request.spent, cents(2500));
        assert_eq!(request.groups.len(), 1);
    }
}
