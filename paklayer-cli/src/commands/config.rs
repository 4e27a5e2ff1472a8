//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show` and `config init`.

use std::path::Path;

use clap::Subcommand;
use paklayer::config::LoaderConfig;

use super::common::{config_path, load_config};
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Show the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, explicit: Option<&Path>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => {
            println!("{}", config_path(explicit).display());
            Ok(())
        }
        ConfigCommands::Show => run_show(explicit),
        ConfigCommands::Init { force } => run_init(explicit, force),
    }
}

/// Print every setting, grouped by section.
fn run_show(explicit: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(explicit)?;

    println!("[paths]");
    println!("  project_dir      = {}", config.paths.project_dir.display());
    println!("  project_name     = {}", config.paths.project_name);
    println!("  engine_dir       = {}", config.paths.engine_dir.display());
    println!("  pack_root        = {}", config.paths.pack_root.display());
    println!();
    println!("[naming]");
    println!("  marker           = {}", config.naming.marker);
    println!("  asset_extension  = {}", config.naming.asset_extension);
    println!("  generated_suffix = {}", config.naming.generated_suffix);
    println!();
    println!("[archive]");
    println!("  extension        = {}", config.archive.extension);
    println!("  mount_point      = {}", config.archive.mount_point);
    println!();
    println!("[logging]");
    println!("  directory        = {}", config.logging.directory.display());
    println!("  file_name        = {}", config.logging.file_name);
    println!("  filter           = {}", config.logging.filter);

    Ok(())
}

/// Write the default configuration.
fn run_init(explicit: Option<&Path>, force: bool) -> Result<(), CliError> {
    let path = config_path(explicit);
    if path.exists() && !force {
        return Err(CliError::ConfigExists(path));
    }

    LoaderConfig::default().save_to(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_then_show() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.ini");

        run(ConfigCommands::Init { force: false }, Some(path.as_path())).unwrap();
        assert!(path.is_file());

        run(ConfigCommands::Show, Some(path.as_path())).unwrap();
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        std::fs::write(&path, "[paths]\nproject_name = Keep\n").unwrap();

        let result = run(ConfigCommands::Init { force: false }, Some(path.as_path()));
        assert!(matches!(result, Err(CliError::ConfigExists(_))));
        assert!(std::fs::read_to_string(&path).unwrap().contains("Keep"));

        run(ConfigCommands::Init { force: true }, Some(path.as_path())).unwrap();
        assert!(!std::fs::read_to_string(&path).unwrap().contains("Keep"));
    }
}
