//! Storage layer for MoneyFlow
//!
//! Persists the full expense list and the full budget map as JSON under two
//! fixed keys. Collections are read once at startup and rewritten whole after
//! every change.

pub mod file_io;
pub mod store;

pub use file_io::{read_text, write_atomic};
pub use store::{JsonDirStore, KeyValueStore, MemoryStore};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::paths::MoneyflowPaths;
use crate::error::MoneyflowResult;
use crate::models::Expense;
use crate::services::BudgetLedger;

/// Key holding the serialized expense list
pub const EXPENSES_KEY: &str = "all_expenses";
/// Key holding the serialized period → limit map
pub const BUDGETS_KEY: &str = "all_budgets";

/// Typed access to the persisted collections
pub struct Storage {
    backend: Box<dyn KeyValueStore>,
}

impl Storage {
    /// Wrap any key-value backend
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// File-backed storage under the data directory
    pub fn open(paths: &MoneyflowPaths) -> MoneyflowResult<Self> {
        paths.ensure_directories()?;
        Ok(Self::new(Box::new(JsonDirStore::new(paths.data_dir()))))
    }

    /// In-memory storage
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// Load the expense list, newest first as stored.
    ///
    /// Unparseable content is logged and treated as an empty list; records
    /// that fail validation are skipped.
    pub fn load_expenses(&self) -> MoneyflowResult<Vec<Expense>> {
        let expenses: Vec<Expense> = self.load_or_default(EXPENSES_KEY)?;
        let total = expenses.len();
        let valid: Vec<Expense> = expenses
            .into_iter()
            .filter(|expense| match expense.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!(id = %expense.id, error = %e, "Skipping invalid stored expense");
                    false
                }
            })
            .collect();

        debug!(loaded = valid.len(), skipped = total - valid.len(), "Loaded expenses");
        Ok(valid)
    }

    /// Load the budget map; unparseable content yields an empty map
    pub fn load_budgets(&self) -> MoneyflowResult<BudgetLedger> {
        let ledger: BudgetLedger = self.load_or_default(BUDGETS_KEY)?;
        debug!(periods = ledger.len(), "Loaded budgets");
        Ok(ledger)
    }

    /// Replace the stored expense list
    pub fn save_expenses(&mut self, expenses: &[Expense]) -> MoneyflowResult<()> {
        let json = serde_json::to_string_pretty(expenses)?;
        self.backend.set(EXPENSES_KEY, &json)
    }

    /// Replace the stored budget map
    pub fn save_budgets(&mut self, ledger: &BudgetLedger) -> MoneyflowResult<()> {
        let json = serde_json::to_string_pretty(ledger)?;
        self.backend.set(BUDGETS_KEY, &json)
    }

    fn load_or_default<T>(&self, key: &str) -> MoneyflowResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(T::default());
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key, error = %e, "Stored data is malformed; starting with an empty collection");
                Ok(T::default())
            }
        }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}
