//! Error types for the engine.

use formkit_expr::ParseError;
use formkit_graph::GraphError;
use formkit_schema::{FieldId, SchemaError, SchemaId};
use formkit_store::StoreError;

/// Engine-level errors
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Structural schema violation
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    /// Dependency problem between fields
    #[error("dependency error: {0}")]
    Graph(#[from] GraphError),

    /// A derived field's formula does not parse
    #[error("invalid formula on field {field}: {source}")]
    Formula {
        /// The derived field
        field: FieldId,
        /// Parse failure
        #[source]
        source: ParseError,
    },

    /// A formula references an identifier outside its declared parents
    #[error("formula on field {field} references undeclared identifier {identifier:?}")]
    UndeclaredIdentifier {
        /// The derived field
        field: FieldId,
        /// The offending identifier
        identifier: String,
    },

    /// Repository failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Load target does not exist
    #[error("schema {0} not found")]
    SchemaNotFound(SchemaId),
}
