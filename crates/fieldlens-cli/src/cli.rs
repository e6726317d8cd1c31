//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fieldlens: semantic field classification for API shapes
#[derive(Parser)]
#[command(name = "fieldlens")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a JSON file of field descriptors
    Analyze {
        /// Path to the field descriptor file (JSON array)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path to a JSON configuration override
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the full report to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the full JSON report instead of the summary
        #[arg(long)]
        json: bool,
    },

    /// Print the default configuration as JSON, for tuning
    DefaultConfig,
}
