//! Locale-dependent formatting
//!
//! The application runs in a single fixed locale chosen in settings. The
//! locale decides month names, how money and dates are printed, and the
//! language of advisory prompts and fallbacks.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Money;

const MONTHS_PT_BR: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

const MONTHS_EN_US: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Locale {
    /// Brazilian Portuguese, Brazilian real
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    /// US English, US dollar
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    /// Month display names, January first
    pub fn month_names(&self) -> &'static [&'static str; 12] {
        match self {
            Self::PtBr => &MONTHS_PT_BR,
            Self::EnUs => &MONTHS_EN_US,
        }
    }

    /// Display name of a month (1-12); out-of-range months clamp
    pub fn month_name(&self, month: u32) -> &'static str {
        let index = month.clamp(1, 12) as usize - 1;
        self.month_names()[index]
    }

    pub fn currency_symbol(&self) -> &'static str {
        match self {
            Self::PtBr => "R$",
            Self::EnUs => "$",
        }
    }

    /// Format an amount with currency symbol and grouping
    pub fn format_money(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let digits = self.format_amount(amount.abs());
        match self {
            Self::PtBr => format!("{}{} {}", sign, self.currency_symbol(), digits),
            Self::EnUs => format!("{}{}{}", sign, self.currency_symbol(), digits),
        }
    }

    /// Format an amount without the currency symbol, as the masked input shows it
    pub fn format_amount(&self, amount: Money) -> String {
        match self {
            Self::PtBr => amount.format_grouped(".", ","),
            Self::EnUs => amount.format_grouped(",", "."),
        }
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        match self {
            Self::PtBr => date.format("%d/%m/%Y").to_string(),
            Self::EnUs => date.format("%m/%d/%Y").to_string(),
        }
    }

    /// Short day/month plus time, used in group drill-downs
    pub fn format_date_time(&self, at: NaiveDateTime) -> String {
        match self {
            Self::PtBr => at.format("%d/%m %H:%M").to_string(),
            Self::EnUs => at.format("%m/%d %I:%M %p").to_string(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PtBr => write!(f, "pt-BR"),
            Self::EnUs => write!(f, "en-US"),
        }
    }
}
