//! CLI subcommands.

pub mod common;
pub mod config;
pub mod metadata;
pub mod resolve;
pub mod scan;
