//! PakLayer CLI - Command-line interface
//!
//! Inspect pack discovery, mount packs and list the metadata they describe.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;

use crate::commands::config::ConfigCommands;
use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(name = "paklayer", version, about = "Priority-ordered content pack loader")]
struct Cli {
    /// Configuration file (defaults to ~/.paklayer/config.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log to stderr as well as the log file
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List packs under the pack root with their priority tiers
    Scan,

    /// Mount every pack and print the metadata records they describe
    Metadata,

    /// Mount every pack and show which one serves a virtual path
    Resolve {
        /// Virtual path, e.g. /Game/Maps/BP_Map1.uasset
        virtual_path: String,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", style("error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Commands::Config { action } = cli.command {
        return commands::config::run(action, cli.config.as_deref());
    }

    let config = commands::common::load_config(cli.config.as_deref())?;
    let _guard = paklayer::logging::init_logging(&config.logging, cli.verbose)?;
    tracing::debug!(version = paklayer::VERSION, "paklayer starting");

    match cli.command {
        Commands::Scan => commands::scan::run(&config),
        Commands::Metadata => commands::metadata::run(config),
        Commands::Resolve { virtual_path } => commands::resolve::run(config, &virtual_path),
        Commands::Config { .. } => Ok(()),
    }
}
