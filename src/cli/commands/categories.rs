use crate::cli::commands::open_settings;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::PoiCategory;
use crate::search::saved_selection;
use crate::ui::messages::header;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Categories { extended } = cmd {
        let available = if *extended {
            PoiCategory::extended_set()
        } else {
            PoiCategory::base_set()
        };
        let selected = saved_selection(&open_settings(cfg), &available);

        header(format!("Categories ({})", available.len()));
        let mut table = Table::new(vec![
            Column::new("", 1),
            Column::new("KEY", 20),
            Column::new("NAME", 20),
        ]);
        for category in &available {
            let mark = if selected.contains(category) { "*" } else { "" };
            table.add_row(vec![
                mark.to_string(),
                category.key().to_string(),
                category.display_name().to_string(),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
