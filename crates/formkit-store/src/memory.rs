//! In-memory repository backend.

use crate::error::StoreError;
use crate::repository::SchemaRepository;
use formkit_schema::{FieldDefinition, FormSchema, SchemaId, SchemaSummary};
use std::collections::HashMap;

/// Ephemeral repository for tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    schemas: HashMap<SchemaId, FormSchema>,
    draft: Vec<FieldDefinition>,
}

impl MemoryRepository {
    /// Create an empty repository
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchemaRepository for MemoryRepository {
    fn save(&mut self, schema: &FormSchema) -> Result<SchemaId, StoreError> {
        let id = SchemaId::new();
        self.schemas.insert(id, schema.clone());
        Ok(id)
    }

    fn load(&self, id: &SchemaId) -> Result<Option<FormSchema>, StoreError> {
        Ok(self.schemas.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<SchemaSummary>, StoreError> {
        let mut summaries: Vec<_> = self
            .schemas
            .iter()
            .map(|(id, schema)| SchemaSummary::of(*id, schema))
            .collect();
        summaries.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(summaries)
    }

    fn delete(&mut self, id: &SchemaId) -> Result<bool, StoreError> {
        Ok(self.schemas.remove(id).is_some())
    }

    fn save_draft(&mut self, fields: &[FieldDefinition]) -> Result<(), StoreError> {
        self.draft = fields.to_vec();
        Ok(())
    }

    fn load_draft(&self) -> Result<Vec<FieldDefinition>, StoreError> {
        Ok(self.draft.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_schema::{FieldDefinition, FieldType};
    use pretty_assertions::assert_eq;

    fn schema(name: &str) -> FormSchema {
        FormSchema::new(name, vec![FieldDefinition::new(FieldType::Text)])
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut repo = MemoryRepository::new();
        let saved = schema("contact");
        let id = repo.save(&saved).unwrap();

        let loaded = repo.load(&id).unwrap().unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn empty_store_lists_nothing() {
        let repo = MemoryRepository::new();
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn every_save_appears_in_the_catalog() {
        let mut repo = MemoryRepository::new();
        repo.save(&schema("one")).unwrap();
        repo.save(&schema("two")).unwrap();

        let names: Vec<_> = repo.list().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"one".to_string()));
        assert!(names.contains(&"two".to_string()));
    }

    #[test]
    fn delete_reports_existence() {
        let mut repo = MemoryRepository::new();
        let id = repo.save(&schema("gone")).unwrap();

        assert!(repo.delete(&id).unwrap());
        assert!(!repo.delete(&id).unwrap());
        assert!(repo.load(&id).unwrap().is_none());
    }

    #[test]
    fn draft_slot_round_trips() {
        let mut repo = MemoryRepository::new();
        assert!(repo.load_draft().unwrap().is_empty());

        let fields = vec![FieldDefinition::new(FieldType::Number)];
        repo.save_draft(&fields).unwrap();
        assert_eq!(repo.load_draft().unwrap(), fields);
    }
}
