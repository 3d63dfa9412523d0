use crate::export::ExportFormat;
use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for poilog
#[derive(Parser)]
#[command(
    name = "poilog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Check in at nearby places and keep a deduplicated, exportable history",
    long_about = None
)]
pub struct Cli {
    /// Override the application directory (config, history, settings)
    #[arg(global = true, long = "dir", value_name = "PATH")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the application directory and default configuration
    Init,

    /// Record a check-in
    Checkin {
        #[arg(long, required_unless_present = "raw", help = "Place name")]
        name: Option<String>,

        #[arg(long, help = "Street address")]
        address: Option<String>,

        #[arg(long, allow_negative_numbers = true, help = "Latitude in degrees")]
        lat: f64,

        #[arg(long, allow_negative_numbers = true, help = "Longitude in degrees")]
        lon: f64,

        #[arg(long, help = "Category key, e.g. cafe or music-venue")]
        category: Option<String>,

        #[arg(
            long,
            conflicts_with_all = ["name", "address", "category"],
            help = "Check in at bare coordinates without a place"
        )]
        raw: bool,
    },

    /// List check-ins, newest first
    List {
        #[arg(long, short = 'n', help = "Show at most N check-ins")]
        limit: Option<usize>,
    },

    /// Show one check-in and its share snippet
    Show {
        /// Full id or unique prefix
        id: String,
    },

    /// Delete check-ins
    Del {
        /// Full ids or unique prefixes
        #[arg(required = true)]
        ids: Vec<String>,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Change the date and time of a check-in (local time)
    EditDate {
        id: String,

        /// New date (YYYY-MM-DD)
        date: String,

        /// New time (HH:MM)
        time: String,
    },

    /// Export the history
    Export {
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", conflicts_with = "out_dir")]
        file: Option<PathBuf>,

        #[arg(
            long = "out-dir",
            value_name = "DIR",
            help = "Directory for the timestamped export file"
        )]
        out_dir: Option<PathBuf>,

        #[arg(long, short = 'f', help = "Overwrite an existing --file")]
        force: bool,
    },

    /// Import check-ins from a JSON export, skipping known ids
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Migrate the legacy check-in file (also runs on every launch)
    Migrate,

    /// Search places around a coordinate
    Nearby {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        #[arg(long, value_name = "FILE", help = "JSON file of candidate places")]
        places: PathBuf,

        #[arg(long, value_name = "N", help = "Check in at the N-th result (1-based)")]
        checkin: Option<usize>,

        #[arg(long, help = "Provider advertises the extended category set")]
        extended: bool,
    },

    /// View or change search preferences
    Settings {
        #[arg(
            long,
            value_name = "LIST",
            help = "Comma-separated category keys (empty string selects none)"
        )]
        categories: Option<String>,

        #[arg(long, value_name = "on|off", value_parser = BoolishValueParser::new())]
        debug: Option<bool>,

        #[arg(long = "print", help = "Print the current preferences")]
        print: bool,
    },

    /// List the known place categories
    Categories {
        #[arg(long, help = "Include the extended category set")]
        extended: bool,
    },
}
