//! `resolve` command: show which pack serves a virtual path.

use paklayer::app::PakLayer;
use paklayer::config::LoaderConfig;

use super::common::tier_label;
use crate::error::CliError;

/// Mount discovered packs and report the winner for `virtual_path`.
pub fn run(config: LoaderConfig, virtual_path: &str) -> Result<(), CliError> {
    let loader = PakLayer::start(config)?;
    loader.mount_discovered()?;

    let source = loader
        .resolve_path(virtual_path)
        .ok_or_else(|| CliError::NotFound(virtual_path.to_string()))?;

    println!("{}", virtual_path);
    println!("  Pack:     {}", source.pack.display());
    println!(
        "  Priority: {} ({})",
        source.priority,
        tier_label(source.priority)
    );

    Ok(())
}
