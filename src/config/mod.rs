use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{AppError, AppResult};
use crate::store::write_atomic;

pub mod settings;

pub use settings::{MemorySettingsStore, SettingsStore, YamlSettingsStore};

const CONFIG_FILE_NAME: &str = "poilog.conf";

/// Proximity search tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_radius")]
    pub radius_meters: f64,
    #[serde(default = "default_movement_threshold")]
    pub movement_threshold_meters: f64,
    /// `None` keeps every candidate within the radius.
    #[serde(default = "default_max_results")]
    pub max_results: Option<usize>,
    #[serde(default = "default_refresh_timeout")]
    pub refresh_timeout_secs: u64,
    #[serde(default = "default_refresh_poll")]
    pub refresh_poll_millis: u64,
}

fn default_radius() -> f64 {
    8040.67
}
fn default_movement_threshold() -> f64 {
    45.7
}
fn default_max_results() -> Option<usize> {
    Some(10)
}
fn default_refresh_timeout() -> u64 {
    10
}
fn default_refresh_poll() -> u64 {
    100
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_meters: default_radius(),
            movement_threshold_meters: default_movement_threshold(),
            max_results: default_max_results(),
            refresh_timeout_secs: default_refresh_timeout(),
            refresh_poll_millis: default_refresh_poll(),
        }
    }
}

impl SearchConfig {
    pub fn refresh_timeout(&self) -> Duration {
        Duration::from_secs(self.refresh_timeout_secs)
    }

    pub fn refresh_poll(&self) -> Duration {
        Duration::from_millis(self.refresh_poll_millis.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data_dir: String,
    #[serde(default = "default_store_file")]
    pub store_file: String,
    #[serde(default = "default_legacy_file")]
    pub legacy_file: String,
    #[serde(default = "default_settings_file")]
    pub settings_file: String,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    #[serde(default)]
    pub search: SearchConfig,
}

fn default_store_file() -> String {
    "history.json".to_string()
}
fn default_legacy_file() -> String {
    "checkins.json".to_string()
}
fn default_settings_file() -> String {
    "settings.yaml".to_string()
}
fn default_export_dir() -> String {
    env::temp_dir().to_string_lossy().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::for_dir(&Self::config_dir())
    }
}

impl Config {
    /// Defaults rooted at `dir`.
    pub fn for_dir(dir: &Path) -> Self {
        Self {
            data_dir: dir.to_string_lossy().to_string(),
            store_file: default_store_file(),
            legacy_file: default_legacy_file(),
            settings_file: default_settings_file(),
            export_dir: default_export_dir(),
            search: SearchConfig::default(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("poilog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".poilog")
        }
    }

    /// Return the full path of the config file inside `dir`
    pub fn config_file_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE_NAME)
    }

    /// Load configuration from `dir`, or return defaults if not found.
    pub fn load_from(dir: &Path) -> AppResult<Self> {
        let path = Self::config_file_in(dir);
        if !path.exists() {
            return Ok(Self::for_dir(dir));
        }

        let content = fs::read_to_string(&path)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;

        if cfg.data_dir.trim().is_empty() {
            cfg.data_dir = dir.to_string_lossy().to_string();
        }
        Ok(cfg)
    }

    /// Create `dir` and write the default configuration unless one exists.
    /// Returns the path of the config file.
    pub fn init_in(dir: &Path) -> AppResult<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = Self::config_file_in(dir);
        if !path.exists() {
            let yaml = serde_yaml::to_string(&Self::for_dir(dir))?;
            write_atomic(&path, yaml.as_bytes())?;
        }
        Ok(path)
    }

    fn resolve(&self, file: &str) -> PathBuf {
        let p = crate::utils::path::expand_tilde(file);
        if p.is_absolute() {
            p
        } else {
            PathBuf::from(&self.data_dir).join(p)
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.resolve(&self.store_file)
    }

    pub fn legacy_path(&self) -> PathBuf {
        self.resolve(&self.legacy_file)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.resolve(&self.settings_file)
    }

    pub fn export_path(&self) -> PathBuf {
        crate::utils::path::expand_tilde(&self.export_dir)
    }
}
