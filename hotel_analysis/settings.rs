use std::path::PathBuf;

use clap::Parser;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Parser, Debug, Default)]
#[command(name = "hotel_analysis", about = "Room counts and cheapest offers from a hotel feed")]
pub struct Cli {
    /// JSON feed to analyze
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// CSV report to (over)write
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Defaults, then `hotels.toml`, then `HOTELS_*` env vars, then flags.
pub fn load(cli: &Cli) -> Result<Settings, ConfigError> {
    Config::builder()
        .set_default("input", "hotels.json")?
        .set_default("output", "hotel_analysis.csv")?
        .add_source(File::new("hotels.toml", FileFormat::Toml).required(false))
        .add_source(Environment::with_prefix("HOTELS"))
        .set_override_option("input", path_value(&cli.input))?
        .set_override_option("output", path_value(&cli.output))?
        .build()?
        .try_deserialize()
}

fn path_value(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref().map(|p| p.to_string_lossy().into_owned())
}
