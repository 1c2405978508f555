//! Budget ledger
//!
//! Holds the spending limit of each period and derives balance, utilization
//! and the alert tier from a limit and an amount spent.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Money, PeriodKey};

/// Utilization at or above this percentage is a warning
pub const WARNING_PERCENT: i64 = 70;
/// Warnings at or above this percentage are shown with extra emphasis
pub const EXTREME_WARNING_PERCENT: i64 = 85;
/// Utilization at or above this percentage is critical
pub const CRITICAL_PERCENT: i64 = 90;

/// Spending limit per period. A missing entry means a zero limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetLedger {
    limits: BTreeMap<PeriodKey, Money>,
}

impl BudgetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored limit for `period`, or zero
    pub fn limit_for(&self, period: PeriodKey) -> Money {
        self.limits.get(&period).copied().unwrap_or_default()
    }

    /// Overwrite the limit for `period`; negative amounts are stored as zero
    /// and oversized ones are capped
    pub fn set_limit(&mut self, period: PeriodKey, amount: Money) -> Money {
        let amount = if amount.is_negative() {
            Money::zero()
        } else {
            amount.capped()
        };
        self.limits.insert(period, amount);
        amount
    }

    /// Overwrite the limit for `period` from masked currency input
    pub fn set_limit_from_input(&mut self, period: PeriodKey, input: &str) -> Money {
        self.set_limit(period, Money::from_masked_input(input))
    }

    /// All periods with a stored limit, oldest first
    pub fn iter(&self) -> impl Iterator<Item = (&PeriodKey, &Money)> {
        self.limits.iter()
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}

/// What remains of the limit; negative when overspent
pub fn balance(limit: Money, spent: Money) -> Money {
    limit - spent
}

/// Spent as a percentage of the limit, unclamped.
///
/// Zero whenever the limit is not positive, regardless of spending.
pub fn percent_utilized(limit: Money, spent: Money) -> f64 {
    if !limit.is_positive() {
        return 0.0;
    }
    (spent.cents() as f64 * 100.0) / limit.cents() as f64
}

/// Alert severity derived from utilization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilizationTier {
    /// Below 70%
    Normal,
    /// 70% up to (not including) 90%; `extreme` from 85%
    Warning { extreme: bool },
    /// 90% and above
    Critical,
}

impl UtilizationTier {
    /// Classify utilization with exact integer arithmetic.
    ///
    /// A non-positive limit is always `Normal`.
    pub fn classify(limit: Money, spent: Money) -> Self {
        if !limit.is_positive() {
            return Self::Normal;
        }

        let at_least = |percent: i64| {
            i128::from(spent.cents()) * 100 >= i128::from(limit.cents()) * i128::from(percent)
        };

        if at_least(CRITICAL_PERCENT) {
            Self::Critical
        } else if at_least(WARNING_PERCENT) {
            Self::Warning {
                extreme: at_least(EXTREME_WARNING_PERCENT),
            }
        } else {
            Self::Normal
        }
    }

    pub fn is_alert(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}

impl fmt::Display for UtilizationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Warning { extreme: false } => write!(f, "warning"),
            Self::Warning { extreme: true } => write!(f, "warning (extreme)"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Budget figures for one period
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub limit: Money,
    pub spent: Money,
    pub balance: Money,
    pub percent: f64,
    pub tier: UtilizationTier,
}

impl BudgetStatus {
    pub fn new(limit: Money, spent: Money) -> Self {
        Self {
            limit,
            spent,
            balance: balance(limit, spent),
            percent: percent_utilized(limit, spent),
            tier: UtilizationTier::classify(limit, spent),
        }
    }

    /// The alert to show, if any. Alerts need a positive limit.
    pub fn alert(&self) -> Option<UtilizationTier> {
        (self.limit.is_positive() && self.tier.is_alert()).then_some(self.tier)
    }

    pub fn has_limit(&self) -> bool {
        self.limit.is_positive()
    }
}
