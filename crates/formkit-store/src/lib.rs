//! Formkit Store - schema persistence
//!
//! One explicit repository interface with a single consistent storage
//! layout: saved schemas keyed by id, a catalog derived from them, and a
//! draft slot for the builder's unsaved working list.
//!
//! Two backends:
//! - [`MemoryRepository`]: ephemeral, for tests and short-lived sessions
//! - [`FileRepository`]: one JSON document on disk, rewritten wholesale on
//!   every mutation (write-to-temp-then-rename)

#![warn(unreachable_pub)]

mod error;
mod file;
mod memory;
mod repository;

pub use error::StoreError;
pub use file::FileRepository;
pub use memory::MemoryRepository;
pub use repository::SchemaRepository;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
