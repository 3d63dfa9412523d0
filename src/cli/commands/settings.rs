use crate::cli::commands::open_settings;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::SettingsStore;
use crate::config::settings::{KEY_DEBUG_MODE, KEY_SELECTED_CATEGORIES};
use crate::errors::AppResult;
use crate::models::PoiCategory;
use crate::models::category::{describe_selection, parse_category_list};
use crate::search::saved_selection;
use crate::ui::messages::{header, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Settings {
        categories,
        debug,
        print,
    } = cmd
    {
        let mut settings = open_settings(cfg);

        if let Some(list) = categories {
            let selection = parse_category_list(list)?;
            let keys: Vec<String> = selection.iter().map(|c| c.key().to_string()).collect();
            settings.set_strings(KEY_SELECTED_CATEGORIES, &keys)?;
            success(format!(
                "Categories: {}",
                describe_selection(&selection, &PoiCategory::extended_set())
            ));
        }

        if let Some(on) = debug {
            settings.set_bool(KEY_DEBUG_MODE, *on)?;
            success(format!("Debug mode {}", if *on { "on" } else { "off" }));
        }

        if *print || (categories.is_none() && debug.is_none()) {
            let available = PoiCategory::extended_set();
            let selection = saved_selection(&settings, &available);
            header("Preferences");
            println!(
                "categories: {}",
                describe_selection(&selection, &available)
            );
            let keys: Vec<&str> = selection.iter().map(|c| c.key()).collect();
            println!("keys:       {}", keys.join(","));
            println!(
                "debug:      {}",
                if settings.get_bool(KEY_DEBUG_MODE) { "on" } else { "off" }
            );
        }
    }

    Ok(())
}
