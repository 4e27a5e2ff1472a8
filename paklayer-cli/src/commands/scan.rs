//! `scan` command: list discovered packs.

use console::style;
use paklayer::config::LoaderConfig;
use paklayer::discovery::{PackDiscovery, PackSource};
use paklayer::priority::PriorityClassifier;

use super::common::tier_label;
use crate::error::CliError;

/// List packs under the pack root, highest tier first.
pub fn run(config: &LoaderConfig) -> Result<(), CliError> {
    let root = &config.paths.pack_root;
    let discovery = PackDiscovery::new(root, &config.archive.extension);
    let classifier = PriorityClassifier::from_config(&config.paths);

    let mut packs: Vec<(i32, _)> = discovery
        .discover()?
        .into_iter()
        .map(|path| (classifier.classify(&path), path))
        .collect();

    println!("Pack root: {}", root.display());
    println!();

    if packs.is_empty() {
        println!("No *.{} packs found.", discovery.extension());
        return Ok(());
    }

    packs.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    for (tier, path) in &packs {
        println!(
            "  {} {:<16} {}",
            style(tier).bold(),
            tier_label(*tier),
            path.display()
        );
    }
    println!();
    println!("{} pack(s)", packs.len());

    Ok(())
}
