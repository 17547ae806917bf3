use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ventwise_core::UnitSystem;
use ventwise_weather::LocationQuery;

/// Should you open the windows? Compares indoor and outdoor absolute humidity.
#[derive(Debug, Parser)]
#[command(name = "ventwise", version, about)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the configured unit system (metric or imperial)
    #[arg(long, global = true, value_name = "UNITS")]
    pub unit: Option<UnitSystem>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Recommend opening or closing windows
    Advise(AdviseArgs),
    /// Show current outdoor conditions
    Weather(LocationArgs),
    /// Search for a city by name
    Search {
        /// City name, e.g. "Portland, Oregon"
        query: String,
    },
    /// Manage saved indoor conditions
    Indoor {
        #[command(subcommand)]
        action: IndoorCommand,
    },
    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Debug, Args)]
pub struct AdviseArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Indoor temperature in the active unit system (defaults to the saved value)
    #[arg(long, value_name = "TEMP", allow_hyphen_values = true)]
    pub indoor_temp: Option<String>,

    /// Indoor relative humidity in % (defaults to the saved value)
    #[arg(long, value_name = "RH")]
    pub indoor_humidity: Option<String>,

    /// Remember the given indoor conditions for next time
    #[arg(long)]
    pub save: bool,

    /// Print how the recommendation was calculated
    #[arg(long)]
    pub explain: bool,
}

#[derive(Debug, Args)]
pub struct LocationArgs {
    /// City to look up instead of the configured location
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub city: Option<String>,

    /// Latitude in decimal degrees
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

impl LocationArgs {
    pub fn query(&self) -> LocationQuery {
        match (&self.city, self.lat, self.lon) {
            (Some(city), _, _) => LocationQuery::City(city.clone()),
            (None, Some(latitude), Some(longitude)) => LocationQuery::Coordinates {
                latitude,
                longitude,
            },
            _ => LocationQuery::Configured,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum IndoorCommand {
    /// Save indoor temperature and relative humidity
    Set {
        #[arg(allow_hyphen_values = true)]
        temperature: String,
        humidity: String,
    },
    /// Show the saved indoor conditions
    Show,
    /// Forget the saved indoor conditions
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the active configuration as TOML
    Show,
    /// Check the configuration and list warnings
    Validate,
}
