//! `metadata` command: print every metadata record.

use console::style;
use paklayer::app::PakLayer;
use paklayer::config::LoaderConfig;

use crate::error::CliError;

/// Mount discovered packs and print their records.
pub fn run(config: LoaderConfig) -> Result<(), CliError> {
    let loader = PakLayer::start(config)?;
    let records = loader.get_all_metadata();

    if records.is_empty() {
        println!("No metadata found in {} mounted pack(s).", loader.mounted_packs().len());
        return Ok(());
    }

    for record in &records {
        println!("{}", style(record.level_name()).bold());
        if !record.level_description().as_str().is_empty() {
            println!("  {}", record.level_description());
        }
        println!("  Level:  {}", record.level_reference());
        println!("  Pack:   {}", record.source().display());
        println!();
    }

    println!(
        "{} record(s) from {} mounted pack(s)",
        records.len(),
        loader.mounted_packs().len()
    );

    Ok(())
}
