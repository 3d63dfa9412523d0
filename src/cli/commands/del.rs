use crate::cli::commands::{ask_confirmation, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::CheckInLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { ids, yes } = cmd {
        let mut store = open_store(cfg);

        let resolved = ids
            .iter()
            .map(|text| CheckInLogic::resolve_id(&store, text))
            .collect::<AppResult<Vec<_>>>()?;

        let prompt = format!(
            "Delete {} check-in(s)? This action is irreversible.",
            resolved.len()
        );
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let removed = CheckInLogic::delete(&mut store, &resolved)?;
        success(format!("{removed} check-in(s) deleted."));
    }

    Ok(())
}
