//! Contract tests run against every repository backend.

use formkit_schema::{FieldDefinition, FieldType, FormSchema};
use formkit_store::{FileRepository, MemoryRepository, SchemaRepository};

fn sample_schema(name: &str) -> FormSchema {
    let a = FieldDefinition::new(FieldType::Text).with_id("a").with_label("A");
    let b = FieldDefinition::new(FieldType::Number).with_id("b").with_label("B");
    FormSchema::new(name, vec![a, b])
}

fn exercise(repo: &mut dyn SchemaRepository) {
    // Empty store: empty catalog, empty draft.
    assert!(repo.list().unwrap().is_empty());
    assert!(repo.load_draft().unwrap().is_empty());

    // Saving twice yields two distinct catalog entries.
    let first = sample_schema("first");
    let second = sample_schema("second");
    let first_id = repo.save(&first).unwrap();
    let second_id = repo.save(&second).unwrap();
    assert_ne!(first_id, second_id);

    let catalog = repo.list().unwrap();
    assert_eq!(catalog.len(), 2);
    assert!(catalog.iter().all(|s| s.field_count == 2));

    // Loading returns the exact ordered field list that was saved.
    let loaded = repo.load(&first_id).unwrap().unwrap();
    assert_eq!(loaded.fields, first.fields);

    // Draft slot round-trips and does not disturb the catalog.
    let draft = vec![FieldDefinition::new(FieldType::Checkbox)];
    repo.save_draft(&draft).unwrap();
    assert_eq!(repo.load_draft().unwrap(), draft);
    assert_eq!(repo.list().unwrap().len(), 2);

    // Delete removes exactly one entry.
    assert!(repo.delete(&first_id).unwrap());
    assert!(repo.load(&first_id).unwrap().is_none());
    assert_eq!(repo.list().unwrap().len(), 1);
}

#[test]
fn memory_repository_honors_the_contract() {
    let mut repo = MemoryRepository::new();
    exercise(&mut repo);
}

#[test]
fn file_repository_honors_the_contract() {
    let dir = tempfile::tempdir().unwrap();
    let mut repo = FileRepository::open(dir.path().join("store.json"));
    exercise(&mut repo);
}
