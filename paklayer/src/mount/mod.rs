//! Pack mount lifecycle.
//!
//! [`MountTable`] is the bookkeeping: which packs are mounted, at which
//! priority, in which order. [`MountManager`] drives the VFS and keeps the
//! table in step with it:
//!
//! ```text
//! mount(path)
//!   ├── classify(path) ──────────────▶ priority
//!   ├── table.contains(path)? ───────▶ Ok(true), VFS untouched
//!   ├── vfs.mount(path, priority)
//!   │     ├── Ok  ──▶ table.register ──▶ Ok(true)
//!   │     └── Err ──▶ MountFailed (table unchanged)
//! ```

mod error;
mod manager;
mod table;

pub use error::{MountError, MountResult};
pub use manager::MountManager;
pub use table::{MountEntry, MountState, MountTable};
