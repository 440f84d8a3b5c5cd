mod db;
mod import;
mod parse;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use db::{HotelStore, SqliteStore};
use tracing::info;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = settings::Cli::parse();
    let settings = settings::load(&cli).context("Failed to load settings")?;
    info!(settings_loaded = ?settings, msg = "Starting hotel import");

    println!("Hotel Import");
    println!("============\n");

    let text = std::fs::read_to_string(&settings.export)
        .with_context(|| format!("Failed to read export {:?}", settings.export))?;

    let conn = db::connect(&settings.db_path)?;
    println!("Database: {:?}\n", settings.db_path);
    db::create_tables(&conn)?;
    let mut store = SqliteStore::new(&conn);

    if settings.clean {
        let removed = store.clear()?;
        info!(removed, "Cleared hotels table");
    }

    let blocks = parse::parse_export(&text);
    info!(blocks = blocks.len(), path = ?settings.export, "Parsed export");

    let stats = import::import_blocks(&mut store, blocks);
    stats.print();
    info!(stored = store.count()?, "Import finished");
    Ok(())
}
