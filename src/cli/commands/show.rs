use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::CheckInLogic;
use crate::errors::{AppError, AppResult};
use crate::models::CaptureData;
use crate::ui::messages::header;
use chrono::Local;

const WRAP: usize = 72;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let store = open_store(cfg);
        let id = CheckInLogic::resolve_id(&store, id)?;
        let record = store.get(id).ok_or(AppError::RecordNotFound(id))?;

        header(record.name());
        println!("id:          {}", record.id());
        println!(
            "when:        {} {}",
            record.date_in(&Local),
            record.time_in(&Local)
        );
        println!("category:    {}", record.category_text());
        println!("coordinates: {}", record.location());

        let address = textwrap::fill(record.address_text(), WRAP - 13);
        let mut lines = address.lines();
        println!("address:     {}", lines.next().unwrap_or_default());
        for line in lines {
            println!("             {line}");
        }

        println!();
        header("Share");
        println!("{}", CaptureData::from_record(record, &Local).yaml_string());
    }

    Ok(())
}
