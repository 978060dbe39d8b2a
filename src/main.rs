//! Main application entry point (CLI binary).
//!
//! A thin wrapper around the `ipgeo` library that handles argument parsing,
//! `.env` loading, logger setup and printing. Exits with status 1 when no
//! requested family produced a record.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use ipgeo::initialization::init_logger_with;
use ipgeo::{render_json, render_table, run_lookup, serve, Config, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG and friends may come from a .env file
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    if config.serve.is_some() {
        if let Err(e) = serve(&config).await {
            eprintln!("ipgeo error: {:#}", e);
            process::exit(1);
        }
        return Ok(());
    }

    match run_lookup(&config).await {
        Ok(report) => {
            let rendered = match config.format {
                OutputFormat::Json => render_json(&report)?,
                OutputFormat::Table => render_table(&report),
            };
            println!("{}", rendered);

            if let Some(path) = &report.exported {
                eprintln!("Record exported to {}", path.display());
            }
            if report.is_empty() {
                eprintln!("No provider returned data");
                process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("ipgeo error: {:#}", e);
            process::exit(1);
        }
    }
}
