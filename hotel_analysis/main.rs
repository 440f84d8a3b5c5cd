mod aggregate;
mod extract;
mod feed;
mod report;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
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
    info!(settings_loaded = ?settings, msg = "Starting hotel analysis");

    let records = feed::load(&settings.input)?;
    info!(records = records.len(), path = ?settings.input, "Loaded hotel feed");

    let mut analysis = aggregate::analyze(&records);
    info!(
        considered = analysis.considered,
        skipped = analysis.skipped,
        priced = analysis.priced.len(),
        "Analysis finished"
    );

    let written = report::write_csv(&settings.output, &mut analysis.priced)
        .with_context(|| format!("Failed to write report {:?}", settings.output))?;
    info!(rows = written, path = ?settings.output, "Report written");

    report::print_summary(&analysis, &settings.output);
    Ok(())
}
