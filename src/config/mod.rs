//! Configuration module for MoneyFlow
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Locale-dependent formatting

pub mod locale;
pub mod paths;
pub mod settings;

pub use locale::Locale;
pub use paths::MoneyflowPaths;
pub use settings::{AdvisorySettings, Settings};
