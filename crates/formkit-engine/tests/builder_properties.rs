//! Property tests for the field-list editing operations.

use formkit_engine::{MoveDirection, SchemaBuilder};
use formkit_schema::FieldType;
use proptest::prelude::*;

fn field_type() -> impl Strategy<Value = FieldType> {
    prop::sample::select(FieldType::ALL.as_slice())
}

proptest! {
    #[test]
    fn add_grows_the_list_by_one(types in prop::collection::vec(field_type(), 0..20)) {
        let mut builder = SchemaBuilder::new();
        for (i, t) in types.iter().enumerate() {
            builder.add_field(*t);
            prop_assert_eq!(builder.len(), i + 1);
        }
    }

    #[test]
    fn ids_stay_unique(types in prop::collection::vec(field_type(), 1..20)) {
        let mut builder = SchemaBuilder::new();
        for t in &types {
            builder.add_field(*t);
        }
        let mut ids: Vec<_> = builder.fields().iter().map(|f| f.id.clone()).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), types.len());
    }

    #[test]
    fn move_preserves_the_set_of_fields(
        types in prop::collection::vec(field_type(), 1..10),
        moves in prop::collection::vec((0usize..10, prop::bool::ANY), 0..20),
    ) {
        let mut builder = SchemaBuilder::new();
        for t in &types {
            builder.add_field(*t);
        }
        let mut before: Vec<_> = builder.fields().iter().map(|f| f.id.clone()).collect();
        before.sort();

        for (index, up) in moves {
            let direction = if up { MoveDirection::Up } else { MoveDirection::Down };
            builder.move_field(index, direction);
        }

        let mut after: Vec<_> = builder.fields().iter().map(|f| f.id.clone()).collect();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn move_then_reverse_restores_order(
        types in prop::collection::vec(field_type(), 2..10),
        index in 0usize..9,
    ) {
        let mut builder = SchemaBuilder::new();
        for t in &types {
            builder.add_field(*t);
        }
        let snapshot: Vec<_> = builder.fields().iter().map(|f| f.id.clone()).collect();

        if builder.move_field(index, MoveDirection::Down) {
            prop_assert!(builder.move_field(index + 1, MoveDirection::Up));
        }
        let restored: Vec<_> = builder.fields().iter().map(|f| f.id.clone()).collect();
        prop_assert_eq!(snapshot, restored);
    }

    #[test]
    fn delete_removes_exactly_the_target(
        types in prop::collection::vec(field_type(), 1..10),
        pick in 0usize..9,
    ) {
        let mut builder = SchemaBuilder::new();
        for t in &types {
            builder.add_field(*t);
        }
        let pick = pick % builder.len();
        let target = builder.fields()[pick].id.clone();

        prop_assert!(builder.delete_field(&target));
        prop_assert_eq!(builder.len(), types.len() - 1);
        prop_assert!(builder.fields().iter().all(|f| f.id != target));

        // A second delete of the same id finds nothing.
        prop_assert!(!builder.delete_field(&target));
    }
}
