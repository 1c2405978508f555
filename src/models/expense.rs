//! Expense model
//!
//! A single spending event: a positive amount, a free-text description and the
//! moment it happened. Expenses are never edited after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::{Money, MAX_AMOUNT_CENTS};

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Amount spent, always positive
    pub amount: Money,

    /// Description as typed (trimmed, original casing)
    pub description: String,

    /// When the expense happened (ISO-8601 in storage)
    pub date: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense with a fresh ID
    ///
    /// The description is trimmed; its casing is preserved.
    pub fn new(
        amount: Money,
        description: impl AsRef<str>,
        date: DateTime<Utc>,
    ) -> Result<Self, ExpenseValidationError> {
        let expense = Self {
            id: ExpenseId::new(),
            amount,
            description: description.as_ref().trim().to_string(),
            date,
        };
        expense.validate()?;
        Ok(expense)
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        if !self.amount.is_within_limit() {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }

        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        Ok(())
    }

    /// Grouping key: trimmed and lowercased description
    pub fn normalized_description(&self) -> String {
        normalize_description(&self.description)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.id, self.description, self.amount)
    }
}

/// Normalize a description for grouping
pub fn normalize_description(description: &str) -> String {
    description.trim().to_lowercase()
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    EmptyDescription,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive, got {}", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Expense amount {} exceeds the maximum of {}",
                amount,
                Money::from_cents(MAX_AMOUNT_CENTS)
            ),
            Self::EmptyDescription => write!(f, "Expense description cannot be empty"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
