//! Submit-time validation rules.

use formkit_expr::Value;
use formkit_schema::FieldDefinition;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    // Same shape check the original form ran: something@something.something,
    // no whitespace or extra @s.
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| panic!("email regex: {e}"))
});

pub(crate) const MSG_REQUIRED: &str = "This field is required.";
pub(crate) const MSG_NOT_EMPTY: &str = "Cannot be empty.";
pub(crate) const MSG_EMAIL: &str = "Invalid email format.";
pub(crate) const MSG_PASSWORD: &str =
    "Password must be at least 8 characters and contain a number.";

/// Check one field's value against its rules.
///
/// Rules run in a fixed order and the first failure wins:
/// required -> notEmpty -> minLength -> maxLength -> emailFormat ->
/// passwordRule. Length, email and password checks apply to text values
/// only; email and password additionally skip empty values.
#[must_use]
pub fn check_field(field: &FieldDefinition, value: &Value) -> Option<String> {
    if field.required && value.is_missing() {
        return Some(MSG_REQUIRED.to_string());
    }

    let rules = &field.validation;

    // The blank-text view of the value: Empty behaves like "".
    let text = match value {
        Value::Empty => Some(""),
        Value::Text(s) => Some(s.as_str()),
        _ => None,
    };

    if rules.not_empty == Some(true) {
        if let Some(s) = text {
            if s.trim().is_empty() {
                return Some(MSG_NOT_EMPTY.to_string());
            }
        }
    }

    if let (Some(min), Some(s)) = (rules.min_length, text) {
        if s.chars().count() < min {
            return Some(format!("Minimum length is {min}."));
        }
    }

    if let (Some(max), Some(s)) = (rules.max_length, text) {
        if s.chars().count() > max {
            return Some(format!("Maximum length is {max}."));
        }
    }

    if rules.email_format == Some(true) {
        if let Some(s) = text.filter(|s| !s.is_empty()) {
            if !EMAIL_RE.is_match(s) {
                return Some(MSG_EMAIL.to_string());
            }
        }
    }

    if rules.password_rule == Some(true) {
        if let Some(s) = text.filter(|s| !s.is_empty()) {
            if s.chars().count() < 8 || !s.chars().any(|c| c.is_ascii_digit()) {
                return Some(MSG_PASSWORD.to_string());
            }
        }
    }

    None
}
