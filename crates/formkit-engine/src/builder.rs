//! The working field list under edit.

use crate::error::EngineError;
use formkit_expr::parse;
use formkit_graph::DependencyGraph;
use formkit_schema::{
    FieldDefinition, FieldId, FieldPatch, FieldType, FormSchema, SchemaError, SchemaId,
};
use formkit_store::SchemaRepository;
use tracing::debug;

/// Direction for adjacent-swap reordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Toward index 0
    Up,
    /// Toward the end of the list
    Down,
}

/// Mutable, ordered field list with a terminal save.
///
/// The builder owns the list until [`SchemaBuilder::save`] copies it into the
/// repository as a named [`FormSchema`]. The unsaved list can be parked in
/// the repository's draft slot between sessions.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldDefinition>,
}

impl SchemaBuilder {
    /// Start with an empty field list
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing field list
    #[inline]
    #[must_use]
    pub fn from_fields(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    /// Resume from the repository's draft slot (empty list when absent)
    pub fn load_draft(repo: &dyn SchemaRepository) -> Result<Self, EngineError> {
        Ok(Self::from_fields(repo.load_draft()?))
    }

    /// Park the working list in the repository's draft slot
    pub fn save_draft(&self, repo: &mut dyn SchemaRepository) -> Result<(), EngineError> {
        repo.save_draft(&self.fields)?;
        Ok(())
    }

    /// The working list, in order
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Number of fields under edit
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the working list is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Append a fresh field of the given type, returning its id
    pub fn add_field(&mut self, field_type: FieldType) -> FieldId {
        let field = FieldDefinition::new(field_type);
        let id = field.id.clone();
        self.fields.push(field);
        id
    }

    /// Merge a partial update into the field with the given id.
    ///
    /// Silently does nothing when the id is unknown.
    pub fn update_field(&mut self, id: &FieldId, patch: FieldPatch) {
        if let Some(field) = self.fields.iter_mut().find(|f| &f.id == id) {
            field.apply(patch);
        }
    }

    /// Swap the field at `index` with its neighbor in the given direction.
    ///
    /// A no-op (returning `false`) at the boundaries and for out-of-range
    /// indices.
    pub fn move_field(&mut self, index: usize, direction: MoveDirection) -> bool {
        if index >= self.fields.len() {
            return false;
        }
        let target = match direction {
            MoveDirection::Up => {
                if index == 0 {
                    return false;
                }
                index - 1
            }
            MoveDirection::Down => {
                if index + 1 >= self.fields.len() {
                    return false;
                }
                index + 1
            }
        };
        self.fields.swap(index, target);
        true
    }

    /// Remove the field with the given id; returns whether it existed
    pub fn delete_field(&mut self, id: &FieldId) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| &f.id != id);
        self.fields.len() != before
    }

    /// Validate and persist the working list as a named schema.
    ///
    /// An empty or whitespace-only name blocks the save before the
    /// repository is touched. Validation covers structural invariants,
    /// formula syntax, undeclared identifiers and dependency cycles; the
    /// catalog is updated as part of the same save.
    pub fn save(
        &self,
        name: &str,
        repo: &mut dyn SchemaRepository,
    ) -> Result<SchemaId, EngineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SchemaError::EmptyName.into());
        }

        let schema = FormSchema::new(name, self.fields.clone());
        validate_schema(&schema)?;

        let id = repo.save(&schema)?;
        debug!(%id, name, fields = schema.fields.len(), "schema saved");
        Ok(id)
    }
}

/// Full save-time validation: structure, formulas, dependencies.
pub fn validate_schema(schema: &FormSchema) -> Result<(), EngineError> {
    schema.validate()?;

    for field in schema.derived_fields() {
        // validate() guarantees a formula is present on derived fields
        let formula = field.formula.as_deref().unwrap_or_default();
        let expr = parse(formula).map_err(|source| EngineError::Formula {
            field: field.id.clone(),
            source,
        })?;
        for identifier in expr.identifiers() {
            if !field
                .parent_field_ids
                .iter()
                .any(|p| p.as_str() == identifier)
            {
                return Err(EngineError::UndeclaredIdentifier {
                    field: field.id.clone(),
                    identifier: identifier.to_string(),
                });
            }
        }
    }

    DependencyGraph::build(&schema.fields)?.validate()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_store::MemoryRepository;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_appends_with_fresh_ids() {
        let mut builder = SchemaBuilder::new();
        let first = builder.add_field(FieldType::Text);
        let second = builder.add_field(FieldType::Select);

        assert_eq!(builder.len(), 2);
        assert_ne!(first, second);
        assert_eq!(builder.fields()[1].options, vec!["Option 1", "Option 2"]);
    }

    #[test]
    fn update_unknown_id_is_a_silent_noop() {
        let mut builder = SchemaBuilder::new();
        builder.add_field(FieldType::Text);
        let snapshot = builder.fields().to_vec();

        builder.update_field(&FieldId::from("ghost"), FieldPatch::new().label("x"));
        assert_eq!(builder.fields(), snapshot.as_slice());
    }

    #[test]
    fn move_swaps_adjacent_fields() {
        let mut builder = SchemaBuilder::new();
        let a = builder.add_field(FieldType::Text);
        let b = builder.add_field(FieldType::Text);

        assert!(builder.move_field(1, MoveDirection::Up));
        assert_eq!(builder.fields()[0].id, b);
        assert_eq!(builder.fields()[1].id, a);
    }

    #[test]
    fn move_is_a_noop_at_the_boundaries() {
        let mut builder = SchemaBuilder::new();
        builder.add_field(FieldType::Text);
        builder.add_field(FieldType::Text);
        let snapshot = builder.fields().to_vec();

        assert!(!builder.move_field(0, MoveDirection::Up));
        assert!(!builder.move_field(1, MoveDirection::Down));
        assert!(!builder.move_field(5, MoveDirection::Up));
        assert_eq!(builder.fields(), snapshot.as_slice());
    }

    #[test]
    fn delete_removes_by_id() {
        let mut builder = SchemaBuilder::new();
        let a = builder.add_field(FieldType::Text);
        builder.add_field(FieldType::Text);

        assert!(builder.delete_field(&a));
        assert!(!builder.delete_field(&a));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn save_with_blank_name_leaves_storage_untouched() {
        let mut repo = MemoryRepository::new();
        let mut builder = SchemaBuilder::new();
        builder.add_field(FieldType::Text);

        let err = builder.save("   ", &mut repo).unwrap_err();
        assert!(matches!(err, EngineError::Schema(SchemaError::EmptyName)));
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn save_updates_the_catalog() {
        let mut repo = MemoryRepository::new();
        let mut builder = SchemaBuilder::new();
        builder.add_field(FieldType::Text);

        let id = builder.save("My Form", &mut repo).unwrap();
        let catalog = repo.list().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].id, id);
        assert_eq!(catalog[0].name, "My Form");
    }

    #[test]
    fn save_rejects_bad_formulas() {
        let mut repo = MemoryRepository::new();
        let mut builder = SchemaBuilder::new();
        let a = builder.add_field(FieldType::Number);
        let d = builder.add_field(FieldType::Number);
        let mut patch = FieldPatch::new();
        patch.is_derived = Some(true);
        patch.parent_field_ids = Some(vec![a.clone()]);
        patch.formula = Some("Number(".to_string());
        builder.update_field(&d, patch);

        assert!(matches!(
            builder.save("broken", &mut repo),
            Err(EngineError::Formula { .. })
        ));
    }

    #[test]
    fn save_rejects_undeclared_identifiers() {
        let mut repo = MemoryRepository::new();
        let mut builder = SchemaBuilder::new();
        let a = builder.add_field(FieldType::Number);
        let d = builder.add_field(FieldType::Number);
        let mut patch = FieldPatch::new();
        patch.is_derived = Some(true);
        patch.parent_field_ids = Some(vec![a.clone()]);
        patch.formula = Some("Number(other)".to_string());
        builder.update_field(&d, patch);

        assert!(matches!(
            builder.save("undeclared", &mut repo),
            Err(EngineError::UndeclaredIdentifier { .. })
        ));
    }

    #[test]
    fn draft_round_trip() {
        let mut repo = MemoryRepository::new();
        let mut builder = SchemaBuilder::new();
        builder.add_field(FieldType::Date);
        builder.save_draft(&mut repo).unwrap();

        let resumed = SchemaBuilder::load_draft(&repo).unwrap();
        assert_eq!(resumed.fields(), builder.fields());
    }
}
