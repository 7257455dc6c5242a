//! Testing utilities for the formkit workspace
//!
//! Shared schema fixtures used by integration tests.

#![allow(missing_docs)]

use formkit_schema::{FieldDefinition, FieldType, FormSchema, ValidationRules};

/// A contact form exercising required, length, email and password rules.
pub fn contact_schema() -> FormSchema {
    let name = FieldDefinition::new(FieldType::Text)
        .with_id("name")
        .with_label("Name")
        .required()
        .with_validation(ValidationRules::none().min_length(2).max_length(40));
    let email = FieldDefinition::new(FieldType::Text)
        .with_id("email")
        .with_label("Email")
        .required()
        .with_validation(ValidationRules::none().email_format());
    let password = FieldDefinition::new(FieldType::Text)
        .with_id("password")
        .with_label("Password")
        .with_validation(ValidationRules::none().password_rule());
    let newsletter = FieldDefinition::new(FieldType::Checkbox)
        .with_id("newsletter")
        .with_label("Subscribe");

    FormSchema::new("Contact", vec![name, email, password, newsletter])
}

/// Two number inputs and a derived sum: `total = Number(a) + Number(b)`.
pub fn sum_schema() -> FormSchema {
    let a = FieldDefinition::new(FieldType::Number).with_id("a").with_label("A");
    let b = FieldDefinition::new(FieldType::Number).with_id("b").with_label("B");
    let total = FieldDefinition::new(FieldType::Number)
        .with_id("total")
        .with_label("Total")
        .derived_from(["a", "b"], "Number(a) + Number(b)");

    FormSchema::new("Sum", vec![a, b, total])
}

/// A derived chain: `double` reads `base`, `quad` reads `double`.
pub fn chained_schema() -> FormSchema {
    let base = FieldDefinition::new(FieldType::Number)
        .with_id("base")
        .with_label("Base");
    let double = FieldDefinition::new(FieldType::Number)
        .with_id("double")
        .with_label("Double")
        .derived_from(["base"], "Number(base) * 2");
    let quad = FieldDefinition::new(FieldType::Number)
        .with_id("quad")
        .with_label("Quadruple")
        .derived_from(["double"], "Number(double) * 2");

    FormSchema::new("Chain", vec![base, double, quad])
}

/// Two derived fields reading each other; never validates.
pub fn cyclic_schema() -> FormSchema {
    let first = FieldDefinition::new(FieldType::Number)
        .with_id("first")
        .derived_from(["second"], "Number(second)");
    let second = FieldDefinition::new(FieldType::Number)
        .with_id("second")
        .derived_from(["first"], "Number(first)");

    FormSchema::new("Cycle", vec![first, second])
}
