//! User preferences and one-shot flags, behind an explicit collaborator.
//!
//! Values are YAML values keyed by name. The file-backed store rewrites the
//! whole mapping atomically on every `set`.

use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::errors::AppResult;
use crate::store::write_atomic;

pub const KEY_SELECTED_CATEGORIES: &str = "selected_categories";
pub const KEY_DEBUG_MODE: &str = "debug_mode";

pub trait SettingsStore: Send {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&mut self, key: &str, value: Value) -> AppResult<()>;

    fn get_bool(&self, key: &str) -> bool {
        self.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    fn set_bool(&mut self, key: &str, value: bool) -> AppResult<()> {
        self.set(key, Value::Bool(value))
    }

    /// A list of strings, or `None` when the key was never written.
    fn get_strings(&self, key: &str) -> Option<Vec<String>> {
        let seq = self.get(key)?;
        let items = seq.as_sequence()?;
        Some(
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        )
    }

    fn set_strings(&mut self, key: &str, values: &[String]) -> AppResult<()> {
        let seq = values.iter().cloned().map(Value::String).collect();
        self.set(key, Value::Sequence(seq))
    }
}

/// Settings kept in a YAML mapping on disk.
pub struct YamlSettingsStore {
    path: PathBuf,
    map: Mapping,
}

impl YamlSettingsStore {
    /// Open `path`; a missing or unreadable file starts as an empty mapping.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let map = if path.exists() {
            fs::read_to_string(&path)
                .ok()
                .and_then(|content| serde_yaml::from_str::<Value>(&content).ok())
                .and_then(|v| v.as_mapping().cloned())
                .unwrap_or_else(|| {
                    warn!(path = %path.display(), "settings file unreadable, using defaults");
                    Mapping::new()
                })
        } else {
            Mapping::new()
        };
        Self { path, map }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for YamlSettingsStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.map.get(Value::String(key.to_string())).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> AppResult<()> {
        let mut next = self.map.clone();
        next.insert(Value::String(key.to_string()), value);

        let yaml = serde_yaml::to_string(&next)?;
        write_atomic(&self.path, yaml.as_bytes())?;
        self.map = next;
        Ok(())
    }
}

/// Settings that live only as long as the process. Used by tests and by
/// callers that do not want persistence.
#[derive(Debug, Default, Clone)]
pub struct MemorySettingsStore {
    values: HashMap<String, Value>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> AppResult<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
