//! Path management for MoneyFlow
//!
//! Provides XDG-compliant path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `MONEYFLOW_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/moneyflow` or `~/.config/moneyflow`
//! 3. Windows: `%APPDATA%\moneyflow`

use std::path::PathBuf;

use crate::error::MoneyflowError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "MONEYFLOW_DATA_DIR";

/// Manages all paths used by MoneyFlow
#[derive(Debug, Clone)]
pub struct MoneyflowPaths {
    /// Base directory for all MoneyFlow data
    base_dir: PathBuf,
}

impl MoneyflowPaths {
    /// Create a new MoneyflowPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, MoneyflowError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create MoneyflowPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/moneyflow/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/moneyflow/data/)
    ///
    /// Each persisted collection lives here as `<key>.json`.
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), MoneyflowError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| MoneyflowError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| MoneyflowError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if MoneyFlow has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, MoneyflowError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                MoneyflowError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("moneyflow"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, MoneyflowError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| MoneyflowError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("moneyflow"))
}
