//! Formkit Schema - form schema data model
//!
//! Defines the persistent shape of a form:
//! - Field definitions (type, label, validation rules, derived-field wiring)
//! - Form schemas (named, timestamped, ordered field lists)
//! - Catalog summaries
//! - Structural schema validation
//!
//! # Example
//!
//! ```rust
//! use formkit_schema::{FieldDefinition, FieldType, FormSchema};
//!
//! let name = FieldDefinition::new(FieldType::Text).with_label("Name");
//! let schema = FormSchema::new("Contact", vec![name]);
//! assert!(schema.validate().is_ok());
//! ```

#![warn(unreachable_pub)]

mod error;
mod field;
mod id;
mod schema;

pub use error::SchemaError;
pub use field::{FieldDefinition, FieldPatch, FieldType, ValidationRules};
pub use id::{FieldId, SchemaId};
pub use schema::{FormSchema, SchemaSummary};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
