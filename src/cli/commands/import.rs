use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ImportRunner;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let mut store = open_store(cfg);
        let report = ImportRunner::new(file).run(&mut store)?;
        success(format!(
            "Imported {} check-in(s), skipped {} already present.",
            report.imported, report.skipped
        ));
    }

    Ok(())
}
