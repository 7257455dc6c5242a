//! Field definitions and validation rules.
//!
//! The serialized form matches the JSON the original application persisted:
//! camelCase keys, `type` for the field type, lowercase type names.

use crate::id::FieldId;
use serde::{Deserialize, Serialize};

/// Supported input control types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text input
    Text,
    /// Numeric input
    Number,
    /// Multi-line text input
    Textarea,
    /// Single-select dropdown
    Select,
    /// Exclusive choice group
    Radio,
    /// Boolean toggle
    Checkbox,
    /// Date input
    Date,
}

impl FieldType {
    /// All supported field types, in display order
    pub const ALL: [FieldType; 7] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Date,
    ];

    /// Whether this type carries a list of selectable options
    #[inline]
    #[must_use]
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio | FieldType::Checkbox)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
        };
        write!(f, "{name}")
    }
}

/// Declarative constraints checked at submit time.
///
/// Every rule is optional; absence means the rule is not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationRules {
    /// Reject blank or whitespace-only text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_empty: Option<bool>,
    /// Minimum text length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum text length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Require an email-shaped value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_format: Option<bool>,
    /// Require at least 8 characters including a digit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_rule: Option<bool>,
}

impl ValidationRules {
    /// Rules with nothing set
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// With the not-empty rule enabled
    #[inline]
    #[must_use]
    pub fn not_empty(mut self) -> Self {
        self.not_empty = Some(true);
        self
    }

    /// With a minimum length
    #[inline]
    #[must_use]
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    /// With a maximum length
    #[inline]
    #[must_use]
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    /// With the email-format rule enabled
    #[inline]
    #[must_use]
    pub fn email_format(mut self) -> Self {
        self.email_format = Some(true);
        self
    }

    /// With the password rule enabled
    #[inline]
    #[must_use]
    pub fn password_rule(mut self) -> Self {
        self.password_rule = Some(true);
        self
    }
}

/// One configurable input's full specification within a form schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Unique field id
    pub id: FieldId,
    /// Control type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Human-readable label
    #[serde(default)]
    pub label: String,
    /// Whether a value must be present at submit
    #[serde(default)]
    pub required: bool,
    /// Initial value when a preview session starts
    #[serde(default)]
    pub default_value: String,
    /// Submit-time constraints
    #[serde(default)]
    pub validation: ValidationRules,
    /// Selectable options (choice types)
    #[serde(default)]
    pub options: Vec<String>,
    /// Whether this field's value is computed rather than entered
    #[serde(default)]
    pub is_derived: bool,
    /// Fields this derived field reads from
    #[serde(rename = "parentFields", default)]
    pub parent_field_ids: Vec<FieldId>,
    /// Formula evaluated over the parent values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl FieldDefinition {
    /// Create a field of the given type with a freshly generated id.
    ///
    /// Mirrors the builder's add operation: empty label, not required, empty
    /// default, no rules, and two placeholder options regardless of type.
    #[must_use]
    pub fn new(field_type: FieldType) -> Self {
        Self {
            id: FieldId::generate(),
            field_type,
            label: String::new(),
            required: false,
            default_value: String::new(),
            validation: ValidationRules::none(),
            options: vec!["Option 1".to_string(), "Option 2".to_string()],
            is_derived: false,
            parent_field_ids: Vec::new(),
            formula: None,
        }
    }

    /// With an explicit id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<FieldId>) -> Self {
        self.id = id.into();
        self
    }

    /// With a label
    #[inline]
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Mark as required
    #[inline]
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// With a default value
    #[inline]
    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    /// With validation rules
    #[inline]
    #[must_use]
    pub fn with_validation(mut self, rules: ValidationRules) -> Self {
        self.validation = rules;
        self
    }

    /// With selectable options
    #[inline]
    #[must_use]
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    /// Mark as derived from the given parents with a formula
    #[must_use]
    pub fn derived_from(
        mut self,
        parents: impl IntoIterator<Item = impl Into<FieldId>>,
        formula: impl Into<String>,
    ) -> Self {
        self.is_derived = true;
        self.parent_field_ids = parents.into_iter().map(Into::into).collect();
        self.formula = Some(formula.into());
        self
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, patch: FieldPatch) {
        if let Some(field_type) = patch.field_type {
            self.field_type = field_type;
        }
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(default_value) = patch.default_value {
            self.default_value = default_value;
        }
        if let Some(validation) = patch.validation {
            self.validation = validation;
        }
        if let Some(options) = patch.options {
            self.options = options;
        }
        if let Some(is_derived) = patch.is_derived {
            self.is_derived = is_derived;
        }
        if let Some(parents) = patch.parent_field_ids {
            self.parent_field_ids = parents;
        }
        if let Some(formula) = patch.formula {
            self.formula = Some(formula);
        }
    }
}

/// Partial update for a field definition.
///
/// `None` leaves the corresponding field untouched.
#[derive(Debug, Clone, Default)]
pub struct FieldPatch {
    /// New control type
    pub field_type: Option<FieldType>,
    /// New label
    pub label: Option<String>,
    /// New required flag
    pub required: Option<bool>,
    /// New default value
    pub default_value: Option<String>,
    /// New validation rules (replaces the whole set)
    pub validation: Option<ValidationRules>,
    /// New option list
    pub options: Option<Vec<String>>,
    /// New derived flag
    pub is_derived: Option<bool>,
    /// New parent list
    pub parent_field_ids: Option<Vec<FieldId>>,
    /// New formula
    pub formula: Option<String>,
}

impl FieldPatch {
    /// Empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    #[inline]
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the required flag
    #[inline]
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Set the default value
    #[inline]
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the validation rules
    #[inline]
    #[must_use]
    pub fn validation(mut self, rules: ValidationRules) -> Self {
        self.validation = Some(rules);
        self
    }

    /// Set the option list
    #[inline]
    #[must_use]
    pub fn options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }
}
