//! Assay CLI - dataset quality profiler.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze { file, output, json } => {
            commands::analyze::run(file, output, json, cli.verbose)
        }

        Commands::Types { file, json } => commands::types::run(file, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
