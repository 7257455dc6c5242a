//! Identifier newtypes for fields and saved schemas.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique field identifier.
///
/// Freshly generated ids are identifier-safe (`field_` followed by the first
/// eight hex characters of a uuid v4) so that formulas can reference parent
/// fields by id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Generate a fresh field id
    #[must_use]
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(format!("field_{}", &hex[..8]))
    }

    /// Wrap an existing id string
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is usable as a formula identifier
    /// (`[A-Za-z_][A-Za-z0-9_]*`)
    #[must_use]
    pub fn is_identifier_safe(&self) -> bool {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::str::FromStr for FieldId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

/// Unique saved-schema identifier, assigned by the repository at save time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaId(Uuid);

impl SchemaId {
    /// Generate a new schema id
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SchemaId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SchemaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SchemaId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_id_generation_is_unique() {
        let a = FieldId::generate();
        let b = FieldId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn generated_field_id_is_identifier_safe() {
        let id = FieldId::generate();
        assert!(id.is_identifier_safe(), "{id}");
        assert!(id.as_str().starts_with("field_"));
    }

    #[test]
    fn identifier_safety() {
        assert!(FieldId::from("A").is_identifier_safe());
        assert!(FieldId::from("total_price").is_identifier_safe());
        assert!(!FieldId::from("9lives").is_identifier_safe());
        assert!(!FieldId::from("has-dash").is_identifier_safe());
        assert!(!FieldId::from("").is_identifier_safe());
    }

    #[test]
    fn schema_id_round_trips_through_display() {
        let id = SchemaId::new();
        let parsed: SchemaId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
