use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::fs;
use std::path::Path;

pub fn handle(dir: &Path) -> AppResult<()> {
    let conf = Config::init_in(dir)?;
    let cfg = Config::load_from(dir)?;
    fs::create_dir_all(&cfg.data_dir)?;

    success(format!("Configuration: {}", conf.display()));
    info(format!("History file:  {}", cfg.store_path().display()));
    info(format!("Settings file: {}", cfg.settings_path().display()));
    Ok(())
}
