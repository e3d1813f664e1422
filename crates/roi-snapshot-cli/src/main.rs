mod commands;
mod logging;
mod progress;

use std::fs;
use std::path::Path;
use std::process;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use progress::CliReporter;
use roi_snapshot_core::{AppConfig, SnapshotEngine};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let _guard = logging::init_logger(&logging::LogSettings::from_env());

    let args = Cli::parse();

    let mut config = match roi_snapshot_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(demo_path) = args.demo_path {
        config.demo_snapshot_path = demo_path;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.assembly_timeout_secs = timeout_secs;
    }

    match args.command {
        Some(Commands::Snapshot { pretty, output }) => {
            if let Err(err) = run_snapshot(&config, pretty, output.as_deref()).await {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::Scan) => {
            if let Err(err) = run_scan(&config).await {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }
}

async fn run_snapshot(
    config: &AppConfig,
    pretty: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = SnapshotEngine::new(config.clone());
    let reporter = CliReporter::new();

    // The core defines no timeout of its own; bound the whole assembly here.
    let limit = Duration::from_secs(config.assembly_timeout_secs);
    let snapshot = match tokio::time::timeout(limit, engine.snapshot(&reporter)).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(format!(
                "snapshot assembly did not finish within {}s",
                config.assembly_timeout_secs
            )
            .into())
        }
    };

    let json = if pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };

    match output {
        Some(path) => {
            fs::write(path, json)?;
            info!("Snapshot written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

async fn run_scan(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let engine = SnapshotEngine::new(config.clone());
    let report = engine.scan().await?;

    for pair in &report.pairing.complete {
        println!(
            "{} {}  {} + {}",
            "✓".green(),
            pair.key.to_string().bold(),
            pair.summary.file_name,
            pair.recommendation.file_name,
        );
    }
    for key in &report.pairing.incomplete {
        println!("{} {}  incomplete", "✗".red(), key.to_string().bold());
    }

    info!(
        "{} output files, {} skipped, {} scenarios, {} incomplete",
        format!("{}", report.listing.files.len()).cyan(),
        format!("{}", report.listing.skipped).yellow(),
        format!("{}", report.pairing.complete.len()).green(),
        format!("{}", report.pairing.incomplete.len()).red(),
    );

    Ok(())
}
