//! Error types for dependency analysis.

use formkit_schema::FieldId;

/// Dependency graph errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A parent reference points at a field that is not in the list
    #[error("field {field} references unknown parent {parent}")]
    UnknownParent {
        /// The derived field carrying the reference
        field: FieldId,
        /// The missing parent id
        parent: FieldId,
    },

    /// The dependency graph contains a cycle
    #[error("dependency cycle involving field {0}")]
    CycleDetected(FieldId),
}
