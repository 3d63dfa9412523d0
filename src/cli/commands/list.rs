use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{header, hint};
use crate::utils::short_id;
use crate::utils::table::{Column, Table};
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { limit } = cmd {
        let store = open_store(cfg);

        if store.is_empty() {
            hint("No check-ins yet.");
            return Ok(());
        }

        let shown = limit.unwrap_or(store.len()).min(store.len());
        header(format!("Check-ins ({shown} of {})", store.len()));

        let mut table = Table::new(vec![
            Column::new("ID", 8),
            Column::new("DATE", 10),
            Column::new("TIME", 5),
            Column::new("NAME", 28),
            Column::new("CATEGORY", 16),
            Column::new("ADDRESS", 36),
        ]);

        for record in store.records().iter().take(shown) {
            table.add_row(vec![
                short_id(&record.id()),
                record.date_in(&Local),
                record.time_in(&Local),
                record.name().to_string(),
                record.category_text().to_string(),
                record.address_text().to_string(),
            ]);
        }

        print!("{}", table.render());
    }

    Ok(())
}
