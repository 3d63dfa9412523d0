use crate::cli::commands::{open_settings, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::CheckInLogic;
use crate::errors::{AppError, AppResult};
use crate::models::{GeoPoint, PlaceCandidate};
use crate::search::{
    FilePlacesProvider, ProximitySearchController, SearchDiagnostics, SearchOutcome,
};
use crate::ui::messages::{header, hint, info, success, warning};
use crate::utils::table::{Column, Table};
use std::sync::Arc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Nearby {
        lat,
        lon,
        places,
        checkin,
        extended,
    } = cmd
    {
        let point = GeoPoint::try_new(*lat, *lon)?;
        let provider = FilePlacesProvider::new(places).with_extended_categories(*extended);
        let controller = ProximitySearchController::new(
            Arc::new(provider),
            cfg.search.clone(),
            Box::new(open_settings(cfg)),
        );

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let outcome = runtime.block_on(controller.on_location_update(point));

        match outcome {
            SearchOutcome::Completed { .. } => {}
            SearchOutcome::Cleared => {
                warning("No categories selected. Use `poilog settings --categories ...`.");
                return Ok(());
            }
            SearchOutcome::Failed(err) => return Err(AppError::Provider(err)),
            other => {
                info(format!("Search not run: {other:?}"));
                return Ok(());
            }
        }

        let state = controller.snapshot();
        if let Some(diagnostics) = &state.diagnostics {
            print_diagnostics(diagnostics);
        }

        if state.results.is_empty() {
            hint("No places found nearby.");
            return Ok(());
        }

        header(format!("Places near {point}"));
        print!("{}", render_results(&state.results));

        if let Some(n) = checkin {
            let place = n
                .checked_sub(1)
                .and_then(|i| state.results.get(i))
                .ok_or_else(|| AppError::Other(format!("no result #{n}")))?;
            let mut store = open_store(cfg);
            let record = CheckInLogic::check_in_place(&mut store, place)?;
            success(format!("Checked in at {}", record.name()));
        }
    }

    Ok(())
}

fn render_results(results: &[PlaceCandidate]) -> String {
    let mut table = Table::new(vec![
        Column::new("#", 3),
        Column::new("NAME", 28),
        Column::new("DISTANCE", 9),
        Column::new("CATEGORY", 16),
        Column::new("ADDRESS", 36),
    ]);
    for (i, place) in results.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            place.name.clone(),
            place.formatted_distance(),
            place
                .category
                .map(|c| c.display_name().to_string())
                .unwrap_or_default(),
            place.address.clone(),
        ]);
    }
    table.render()
}

fn print_diagnostics(d: &SearchDiagnostics) {
    header("Debug");
    if let Some(center) = d.center {
        println!("center:        {center}");
    }
    println!("returned:      {}", d.returned);
    println!("unnamed:       {}", d.unnamed);
    println!("beyond radius: {}", d.beyond_radius);
    println!("truncated:     {}", d.truncated);
    println!("kept:          {}", d.kept);
}
