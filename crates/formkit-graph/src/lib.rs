//! Formkit Graph - field dependency analysis
//!
//! Builds a directed graph over a schema's fields (parent -> derived edges),
//! rejects cycles, and produces the topological order in which derived
//! fields must be recomputed so that a derived field reading another derived
//! field always sees the value computed earlier in the same pass.

#![warn(unreachable_pub)]

mod dependency;
mod error;

pub use dependency::DependencyGraph;
pub use error::GraphError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
