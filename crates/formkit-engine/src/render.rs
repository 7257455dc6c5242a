//! Render model: which control variant each field materializes as.
//!
//! A UI layer consumes this; nothing here draws anything.

use crate::session::PreviewSession;
use formkit_expr::Value;
use formkit_schema::{FieldId, FieldType};

/// Plain-input flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Free text
    Text,
    /// Numeric entry
    Number,
    /// Date entry
    Date,
}

/// Control variant for a field
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Single-line input
    Input(InputKind),
    /// Multi-line input
    Multiline {
        /// Suggested visible rows
        rows: usize,
    },
    /// Single-select dropdown
    SelectOne {
        /// Selectable options, in order
        options: Vec<String>,
    },
    /// Exclusive choice group
    ChoiceGroup {
        /// Selectable options, in order
        options: Vec<String>,
    },
    /// Boolean toggle
    Toggle {
        /// Current checked state
        checked: bool,
    },
}

/// One field, ready for a UI layer to draw
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedField {
    /// Field id
    pub id: FieldId,
    /// Label text
    pub label: String,
    /// Control variant
    pub control: Control,
    /// Current value, rendered as display text
    pub value: String,
    /// Current validation message, if any
    pub error: Option<String>,
    /// Whether the control accepts input (derived fields do not)
    pub disabled: bool,
    /// Whether the field is marked required
    pub required: bool,
}

/// Materialize the whole form in field order.
#[must_use]
pub fn render_form(session: &PreviewSession) -> Vec<RenderedField> {
    session
        .schema()
        .fields
        .iter()
        .map(|field| {
            let value = session.value(&field.id).cloned().unwrap_or(Value::Empty);
            let control = match field.field_type {
                FieldType::Text => Control::Input(InputKind::Text),
                FieldType::Number => Control::Input(InputKind::Number),
                FieldType::Date => Control::Input(InputKind::Date),
                FieldType::Textarea => Control::Multiline { rows: 3 },
                FieldType::Select => Control::SelectOne {
                    options: field.options.clone(),
                },
                FieldType::Radio => Control::ChoiceGroup {
                    options: field.options.clone(),
                },
                FieldType::Checkbox => Control::Toggle {
                    checked: value.is_truthy(),
                },
            };
            RenderedField {
                id: field.id.clone(),
                label: field.label.clone(),
                control,
                value: value.to_string(),
                error: session.errors().get(&field.id).cloned(),
                disabled: field.is_derived,
                required: field.required,
            }
        })
        .collect()
}
