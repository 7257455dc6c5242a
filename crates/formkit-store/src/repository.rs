//! The repository seam between the builder, catalog and preview components.

use crate::error::StoreError;
use formkit_schema::{FieldDefinition, FormSchema, SchemaId, SchemaSummary};

/// Storage interface for form schemas.
///
/// Every save assigns an id and updates the catalog, so the listing view and
/// the preview always observe the same set of schemas. The draft slot holds
/// the builder's unsaved working list; it is independent of the catalog.
pub trait SchemaRepository {
    /// Persist a schema, returning its assigned id
    fn save(&mut self, schema: &FormSchema) -> Result<SchemaId, StoreError>;

    /// Load a schema by id; `None` when the id is unknown
    fn load(&self, id: &SchemaId) -> Result<Option<FormSchema>, StoreError>;

    /// Catalog of saved schemas, oldest first.
    ///
    /// An empty or absent store yields an empty list, never an error.
    fn list(&self) -> Result<Vec<SchemaSummary>, StoreError>;

    /// Remove a schema; returns whether it existed
    fn delete(&mut self, id: &SchemaId) -> Result<bool, StoreError>;

    /// Persist the builder's unsaved working list
    fn save_draft(&mut self, fields: &[FieldDefinition]) -> Result<(), StoreError>;

    /// Load the unsaved working list; absent draft = empty list
    fn load_draft(&self) -> Result<Vec<FieldDefinition>, StoreError>;
}
