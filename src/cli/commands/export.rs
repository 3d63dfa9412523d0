use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ExportLogic, notify_export_success};
use crate::ui::messages::warning;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        out_dir,
        force,
    } = cmd
    {
        let store = open_store(cfg);
        if store.is_empty() {
            warning("No check-ins to export; writing an empty file.");
        }

        let dir = out_dir.clone().unwrap_or_else(|| cfg.export_path());
        let path = ExportLogic::export(store.records(), *format, file.as_deref(), &dir, *force)?;
        notify_export_success(format.label(), &path);
    }

    Ok(())
}
