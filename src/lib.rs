//! poilog library root.
//! Exposes the CLI parser, the high-level run() function, and the core
//! modules (store, codec, migration/import, proximity search).

pub mod cli;
pub mod codec;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod search;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::Path;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(Path::new(&cfg.data_dir)),
        Commands::Checkin { .. } => cli::commands::checkin::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Show { .. } => cli::commands::show::handle(&cli.command, cfg),
        Commands::Del { .. } => cli::commands::del::handle(&cli.command, cfg),
        Commands::EditDate { .. } => cli::commands::edit_date::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Import { .. } => cli::commands::import::handle(&cli.command, cfg),
        Commands::Migrate => cli::commands::migrate::handle(cfg),
        Commands::Nearby { .. } => cli::commands::nearby::handle(&cli.command, cfg),
        Commands::Settings { .. } => cli::commands::settings::handle(&cli.command, cfg),
        Commands::Categories { .. } => cli::commands::categories::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let dir = cli.dir.clone().unwrap_or_else(Config::config_dir);

    if let Commands::Init = cli.command {
        return cli::commands::init::handle(&dir);
    }

    let cfg = load_config(&dir)?;

    // The legacy migration runs on every launch; the flag makes it one-shot.
    if !matches!(cli.command, Commands::Migrate) {
        cli::commands::migrate::on_launch(&cfg);
    }

    dispatch(&cli, &cfg)
}

fn load_config(dir: &Path) -> AppResult<Config> {
    let cfg = Config::load_from(dir)?;
    tracing::debug!(data_dir = %cfg.data_dir, "configuration loaded");
    Ok(cfg)
}
