//! Error types for schema validation.

use crate::id::FieldId;

/// Structural schema validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Schema name is empty or whitespace-only
    #[error("schema name must not be empty")]
    EmptyName,

    /// Two fields share an id
    #[error("duplicate field id: {0}")]
    DuplicateFieldId(FieldId),

    /// A derived field has no parents
    #[error("derived field {0} declares no parent fields")]
    DerivedWithoutParents(FieldId),

    /// A derived field has no formula
    #[error("derived field {0} has no formula")]
    DerivedWithoutFormula(FieldId),

    /// A parent reference points at a field that does not exist
    #[error("field {field} references unknown parent {parent}")]
    UnknownParent {
        /// The derived field carrying the reference
        field: FieldId,
        /// The missing parent id
        parent: FieldId,
    },

    /// A parent id cannot appear as a formula identifier
    #[error("parent id {0} is not usable in a formula (must match [A-Za-z_][A-Za-z0-9_]*)")]
    ParentNotIdentifierSafe(FieldId),
}
