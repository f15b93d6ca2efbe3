//! Cribcheck CLI - submission discovery and similarity report assembly
//!
//! Discovers the submissions below a root directory and packages externally
//! computed comparison results into a report archive.

use clap::Parser;

mod cli;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Discover(args) => cli::discover_command(&args)?,
        Commands::Report(args) => cli::report_command(&args)?,
        Commands::PrintDefaultConfig => cli::print_default_config()?,
        Commands::ListLanguages => cli::list_languages(),
    }

    Ok(())
}
