use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{CheckInLogic, parse_local};
use crate::errors::AppResult;
use crate::ui::messages::success;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::EditDate { id, date, time } = cmd {
        let when = parse_local(date, time)?;
        let mut store = open_store(cfg);
        let id = CheckInLogic::resolve_id(&store, id)?;

        let record = CheckInLogic::edit_date(&mut store, id, when)?;
        success(format!(
            "{} now dated {} {}",
            record.name(),
            record.date_in(&Local),
            record.time_in(&Local)
        ));
    }

    Ok(())
}
