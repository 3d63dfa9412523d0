use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::CheckInLogic;
use crate::errors::AppResult;
use crate::models::{GeoPoint, PoiCategory};
use crate::ui::messages::success;
use crate::utils::short_id;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkin {
        name,
        address,
        lat,
        lon,
        category,
        raw,
    } = cmd
    {
        let point = GeoPoint::try_new(*lat, *lon)?;
        let mut store = open_store(cfg);

        let record = if *raw {
            CheckInLogic::check_in_raw(&mut store, point)?
        } else {
            let category = category
                .as_deref()
                .map(str::parse::<PoiCategory>)
                .transpose()?
                .map(|c| c.display_name().to_string());
            CheckInLogic::check_in_manual(
                &mut store,
                name.as_deref().unwrap_or_default(),
                address.as_deref().unwrap_or_default(),
                point,
                category,
            )?
        };

        success(format!(
            "Checked in at {} ({}) [{}]",
            record.name(),
            record.location(),
            short_id(&record.id())
        ));
    }

    Ok(())
}
