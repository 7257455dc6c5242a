//! Formkit Engine - the form lifecycle
//!
//! Ties the workspace together:
//! - [`SchemaBuilder`]: the working field list under edit (add, update,
//!   move, delete) and its terminal save
//! - [`PreviewSession`]: live values, topologically ordered derived-field
//!   recomputation, submit-time validation
//! - [`render_form`]: control-variant dispatch for a UI layer to consume
//!
//! # Example
//!
//! ```rust
//! use formkit_engine::{PreviewSession, SchemaBuilder};
//! use formkit_expr::Value;
//! use formkit_schema::{FieldPatch, FieldType};
//! use formkit_store::MemoryRepository;
//!
//! # fn main() -> Result<(), formkit_engine::EngineError> {
//! let mut repo = MemoryRepository::new();
//! let mut builder = SchemaBuilder::new();
//! let name = builder.add_field(FieldType::Text);
//! builder.update_field(&name, FieldPatch::new().label("Name").required(true));
//!
//! let id = builder.save("Signup", &mut repo)?;
//! let mut session = PreviewSession::load(&repo, &id)?;
//! session.set_value(&name, Value::text("Ada"));
//! assert!(session.validate());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

mod builder;
mod error;
mod render;
mod session;
mod validate;

pub use builder::{validate_schema, MoveDirection, SchemaBuilder};
pub use error::EngineError;
pub use render::{render_form, Control, InputKind, RenderedField};
pub use session::{PreviewSession, SubmitOutcome};
pub use validate::check_field;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
