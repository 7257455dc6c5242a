//! End-to-end flows: build, save, load, preview, submit.

use formkit_engine::{
    render_form, Control, PreviewSession, SchemaBuilder, SubmitOutcome,
};
use formkit_expr::Value;
use formkit_schema::{FieldId, FieldPatch, FieldType};
use formkit_store::{MemoryRepository, SchemaRepository};
use formkit_test_utils::{chained_schema, contact_schema, cyclic_schema, sum_schema};
use pretty_assertions::assert_eq;

fn id(s: &str) -> FieldId {
    FieldId::from(s)
}

#[test]
fn derived_sum_follows_its_parents() {
    let mut session = PreviewSession::new(sum_schema()).unwrap();

    session.set_value(&id("a"), Value::text("2"));
    session.set_value(&id("b"), Value::text("3"));
    assert_eq!(session.value(&id("total")), Some(&Value::Number(5.0)));

    session.set_value(&id("b"), Value::text("10"));
    assert_eq!(session.value(&id("total")), Some(&Value::Number(12.0)));
}

#[test]
fn chained_derived_fields_update_in_one_pass() {
    let mut session = PreviewSession::new(chained_schema()).unwrap();

    session.set_value(&id("base"), Value::Number(3.0));
    assert_eq!(session.value(&id("double")), Some(&Value::Number(6.0)));
    assert_eq!(session.value(&id("quad")), Some(&Value::Number(12.0)));
}

#[test]
fn contact_form_rejects_then_accepts() {
    let mut session = PreviewSession::new(contact_schema()).unwrap();

    match session.submit() {
        SubmitOutcome::Rejected(errors) => {
            assert_eq!(
                errors.get(&id("name")).map(String::as_str),
                Some("This field is required.")
            );
            assert!(errors.contains_key(&id("email")));
            // Optional password with no value has nothing to complain about
            assert!(!errors.contains_key(&id("password")));
        }
        SubmitOutcome::Accepted(_) => panic!("empty contact form must not submit"),
    }

    session.set_value(&id("name"), Value::text("Ada"));
    session.set_value(&id("email"), Value::text("not-an-email"));
    match session.submit() {
        SubmitOutcome::Rejected(errors) => {
            assert_eq!(
                errors.get(&id("email")).map(String::as_str),
                Some("Invalid email format.")
            );
            assert_eq!(errors.len(), 1);
        }
        SubmitOutcome::Accepted(_) => panic!("bad email must not submit"),
    }

    session.set_value(&id("email"), Value::text("ada@example.com"));
    match session.submit() {
        SubmitOutcome::Accepted(values) => {
            assert_eq!(values.get(&id("name")), Some(&Value::text("Ada")));
        }
        SubmitOutcome::Rejected(errors) => panic!("unexpected errors: {errors:?}"),
    }
}

#[test]
fn save_then_load_preserves_fields_and_order() {
    let mut repo = MemoryRepository::new();
    let mut builder = SchemaBuilder::new();

    let first = builder.add_field(FieldType::Text);
    let second = builder.add_field(FieldType::Select);
    builder.update_field(&first, FieldPatch::new().label("Name"));
    builder.update_field(
        &second,
        FieldPatch::new()
            .label("Color")
            .options(vec!["red".into(), "blue".into()]),
    );

    let schema_id = builder.save("Survey", &mut repo).unwrap();

    let loaded = repo.load(&schema_id).unwrap().unwrap();
    assert_eq!(loaded.name, "Survey");
    assert_eq!(loaded.fields.len(), 2);
    assert_eq!(loaded.fields[0].id, first);
    assert_eq!(loaded.fields[1].id, second);
    assert_eq!(loaded.fields[1].options, vec!["red", "blue"]);

    // The catalog lists the save and a session starts from it directly.
    assert_eq!(repo.list().unwrap().len(), 1);
    let session = PreviewSession::load(&repo, &schema_id).unwrap();
    assert_eq!(session.schema().name, "Survey");
}

#[test]
fn cyclic_schema_is_rejected_before_any_session_starts() {
    assert!(PreviewSession::new(cyclic_schema()).is_err());
}

#[test]
fn rendered_form_reflects_session_state() {
    let mut session = PreviewSession::new(contact_schema()).unwrap();
    session.set_value(&id("name"), Value::text("Ada"));
    session.validate();

    let rendered = render_form(&session);
    assert_eq!(rendered.len(), 4);
    assert_eq!(rendered[0].value, "Ada");
    assert_eq!(rendered[0].error, None);
    assert_eq!(
        rendered[1].error.as_deref(),
        Some("This field is required.")
    );
    assert!(matches!(rendered[3].control, Control::Toggle { checked: false }));
}

#[test]
fn derived_values_render_without_trailing_fraction() {
    let mut session = PreviewSession::new(sum_schema()).unwrap();
    session.set_value(&id("a"), Value::text("2"));
    session.set_value(&id("b"), Value::text("3"));

    let rendered = render_form(&session);
    let total = rendered
        .iter()
        .find(|f| f.id == id("total"))
        .expect("total is rendered");
    assert_eq!(total.value, "5");
    assert!(total.disabled);
}
