use std::path::PathBuf;

use clap::Parser;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Parser, Debug, Default)]
#[command(name = "hotel_import", about = "Load a hotel text export into SQLite")]
pub struct Cli {
    /// Text export with `Name:`/`URL:`/`Location:`/`Rating:` blocks
    #[arg(short, long)]
    pub export: Option<PathBuf>,
    /// SQLite database file
    #[arg(long)]
    pub db_path: Option<PathBuf>,
    /// Delete all stored hotels before importing
    #[arg(long)]
    pub clean: bool,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub export: PathBuf,
    pub db_path: PathBuf,
    pub clean: bool,
}

pub fn load(cli: &Cli) -> Result<Settings, ConfigError> {
    Config::builder()
        .set_default("export", "hotel_details.txt")?
        .set_default("db_path", "data/hotels.sqlite")?
        .set_default("clean", false)?
        .add_source(File::new("hotels.toml", FileFormat::Toml).required(false))
        .add_source(Environment::with_prefix("HOTELS"))
        .set_override_option("export", path_value(&cli.export))?
        .set_override_option("db_path", path_value(&cli.db_path))?
        .set_override_option("clean", cli.clean.then_some(true))?
        .build()?
        .try_deserialize()
}

fn path_value(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref().map(|p| p.to_string_lossy().into_owned())
}
