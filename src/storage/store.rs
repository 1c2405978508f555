//! Key-value backends
//!
//! The application persists whole collections under fixed keys. A backend
//! only has to hand back the last text written under a key.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::MoneyflowResult;

use super::file_io::{read_text, write_atomic};

/// Durable string storage addressed by key
pub trait KeyValueStore {
    /// Text stored under `key`, or `None` if nothing was ever written
    fn get(&self, key: &str) -> MoneyflowResult<Option<String>>;

    /// Replace whatever is stored under `key`
    fn set(&mut self, key: &str, value: &str) -> MoneyflowResult<()>;
}

/// Stores each key as `<key>.json` inside a directory
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonDirStore {
    fn get(&self, key: &str) -> MoneyflowResult<Option<String>> {
        read_text(self.path_for(key))
    }

    fn set(&mut self, key: &str, value: &str) -> MoneyflowResult<()> {
        write_atomic(self.path_for(key), value)
    }
}

/// Volatile store, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> MoneyflowResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> MoneyflowResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
