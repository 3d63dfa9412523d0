pub mod categories;
pub mod checkin;
pub mod del;
pub mod edit_date;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod migrate;
pub mod nearby;
pub mod settings;
pub mod show;

use crate::config::{Config, YamlSettingsStore};
use crate::store::RecordStore;
use crate::ui::messages::warning;

use std::io::{self, Write};

pub(crate) fn open_store(cfg: &Config) -> RecordStore {
    RecordStore::open(cfg.store_path())
}

pub(crate) fn open_settings(cfg: &Config) -> YamlSettingsStore {
    YamlSettingsStore::open(cfg.settings_path())
}

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}
