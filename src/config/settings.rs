//! User settings for MoneyFlow
//!
//! Manages locale, calendar zone, the selectable year range and the advisory
//! service configuration. Every field has a default so older or partial
//! config files still load.

use serde::{Deserialize, Serialize};

use super::locale::Locale;
use super::paths::MoneyflowPaths;
use crate::error::MoneyflowError;
use crate::models::CalendarZone;

/// Advisory service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorySettings {
    /// Text-generation model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generative language API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

impl Default for AdvisorySettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AdvisorySettings {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

/// User settings for MoneyFlow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Display and advisory locale
    #[serde(default)]
    pub locale: Locale,

    /// Fixed UTC offset (minutes east) for calendar bucketing; host zone if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,

    /// First year offered by the period selector
    #[serde(default = "default_first_selectable_year")]
    pub first_selectable_year: i32,

    /// Number of consecutive selectable years
    #[serde(default = "default_selectable_year_count")]
    pub selectable_year_count: u32,

    /// Advisory service settings
    #[serde(default)]
    pub advisory: AdvisorySettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_first_selectable_year() -> i32 {
    2026
}

fn default_selectable_year_count() -> u32 {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            locale: Locale::default(),
            utc_offset_minutes: None,
            first_selectable_year: default_first_selectable_year(),
            selectable_year_count: default_selectable_year_count(),
            advisory: AdvisorySettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &MoneyflowPaths) -> Result<Self, MoneyflowError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                MoneyflowError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                MoneyflowError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MoneyflowPaths) -> Result<(), MoneyflowError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            MoneyflowError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            MoneyflowError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Reject settings the rest of the application cannot work with
    pub fn validate(&self) -> Result<(), MoneyflowError> {
        if self.selectable_year_count == 0 {
            return Err(MoneyflowError::Config(
                "selectable_year_count must be at least 1".into(),
            ));
        }
        if self.calendar_zone().is_none() {
            return Err(MoneyflowError::Config(format!(
                "utc_offset_minutes out of range: {:?}",
                self.utc_offset_minutes
            )));
        }
        Ok(())
    }

    /// Calendar zone used to bucket timestamps
    pub fn calendar_zone(&self) -> Option<CalendarZone> {
        CalendarZone::from_offset_minutes(self.utc_offset_minutes)
    }
}
