//! PakLayer - priority-ordered content pack loader
//!
//! This library discovers content packs on disk, mounts them into a
//! priority-ordered overlay filesystem, and extracts the metadata records the
//! packs describe.
//!
//! ```text
//! pack root ──▶ discovery ──▶ mount manager ──▶ overlay VFS
//!                                  │                 │
//!                                  ▼                 ▼
//!                          metadata registry ◀── extractor ◀── type resolver
//! ```
//!
//! The [`app::PakLayer`] facade wires everything together from a
//! [`config::LoaderConfig`]; the individual pieces are usable on their own.

pub mod app;
pub mod archive;
pub mod config;
pub mod discovery;
pub mod logging;
pub mod metadata;
pub mod mount;
pub mod priority;
pub mod resolver;
pub mod vfs;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
