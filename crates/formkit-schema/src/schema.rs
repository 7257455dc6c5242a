//! Form schemas and catalog summaries.

use crate::error::SchemaError;
use crate::field::FieldDefinition;
use crate::id::{FieldId, SchemaId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named, timestamped, ordered list of field definitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    /// Schema name, assigned at save time
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Ordered field definitions
    pub fields: Vec<FieldDefinition>,
}

impl FormSchema {
    /// Create a schema stamped with the current time
    #[must_use]
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
            fields,
        }
    }

    /// Look up a field by id
    #[must_use]
    pub fn field(&self, id: &FieldId) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| &f.id == id)
    }

    /// Iterate over derived fields only
    pub fn derived_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.is_derived)
    }

    /// Check structural invariants.
    ///
    /// Enforced here (the original tolerated all of these silently):
    /// - non-empty name
    /// - unique field ids
    /// - derived fields carry at least one parent and a formula
    /// - parent references resolve to existing fields
    /// - parent ids are usable as formula identifiers
    ///
    /// Dependency cycles between derived fields are not a structural concern
    /// of a single field list; they are rejected by the dependency-graph
    /// layer when a schema is saved or loaded for preview.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(&field.id) {
                return Err(SchemaError::DuplicateFieldId(field.id.clone()));
            }
        }

        for field in self.derived_fields() {
            if field.parent_field_ids.is_empty() {
                return Err(SchemaError::DerivedWithoutParents(field.id.clone()));
            }
            if field.formula.as_deref().map_or(true, |f| f.trim().is_empty()) {
                return Err(SchemaError::DerivedWithoutFormula(field.id.clone()));
            }
            for parent in &field.parent_field_ids {
                if self.field(parent).is_none() {
                    return Err(SchemaError::UnknownParent {
                        field: field.id.clone(),
                        parent: parent.clone(),
                    });
                }
                if !parent.is_identifier_safe() {
                    return Err(SchemaError::ParentNotIdentifierSafe(parent.clone()));
                }
            }
        }

        Ok(())
    }
}

/// Catalog record for a saved schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSummary {
    /// Repository-assigned id
    pub id: SchemaId,
    /// Schema name
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Number of fields in the schema
    pub field_count: usize,
}

impl SchemaSummary {
    /// Build the summary record for a saved schema
    #[must_use]
    pub fn of(id: SchemaId, schema: &FormSchema) -> Self {
        Self {
            id,
            name: schema.name.clone(),
            created_at: schema.created_at,
            field_count: schema.fields.len(),
        }
    }
}
