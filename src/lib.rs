//! MoneyFlow - personal monthly expense tracker
//!
//! This library provides the core of the MoneyFlow budgeting tool: expenses
//! are bucketed into calendar months, each month carries its own spending
//! limit, and spending is consolidated by description.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution, settings and locale
//! - `error`: Custom error types
//! - `models`: Money, expense, period and calendar types
//! - `services`: Period selection, aggregation, budget math and the session
//! - `storage`: Key-value persistence of the expense list and budget map
//! - `advisory`: Spending tips from a text-generation service
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use moneyflow::config::{MoneyflowPaths, Settings};
//! use moneyflow::models::SystemClock;
//! use moneyflow::services::Session;
//! use moneyflow::storage::Storage;
//!
//! let paths = MoneyflowPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut session = Session::load(Storage::open(&paths)?, &settings, Box::new(SystemClock))?;
//! session.add_expense(Money::from_masked_input("1250"), "Padaria");
//! ```

pub mod advisory;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{MoneyflowError, MoneyflowResult};
