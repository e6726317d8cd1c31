//! Fieldlens CLI - semantic field classification for API shapes.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            file,
            config,
            output,
            json,
        } => commands::analyze::run(file, config, output, json, cli.verbose),

        Commands::DefaultConfig => commands::default_config::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
