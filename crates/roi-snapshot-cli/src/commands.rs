use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "roi-snapshot")]
#[command(about = "Assemble budget-optimization snapshots from optimizer outputs", long_about = None)]
pub struct Cli {
    /// Override the optimizer output directory
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Override the bundled demo snapshot location
    #[arg(long, global = true)]
    pub demo_path: Option<PathBuf>,

    /// Override the assembly timeout, in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Assemble the current snapshot and print it as JSON
    Snapshot {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
        /// Write the JSON to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List classified output files and scenario pairs without reading them
    Scan,
    /// Print configuration values
    PrintConfig,
}
