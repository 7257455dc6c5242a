//! Runtime values flowing through formulas and preview sessions.

/// A field's runtime value.
///
/// Entered values are text or booleans; derived values may additionally be
/// numbers. `Empty` is the state of a field with no default and no input yet.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value entered or computed
    Empty,
    /// Numeric value (formula results)
    Number(f64),
    /// Text value (inputs, selects, dates)
    Text(String),
    /// Boolean value (toggles)
    Bool(bool),
}

impl Value {
    /// Text value constructor
    #[inline]
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// The value a field takes from its configured default: empty text maps
    /// to `Empty`, anything else is text.
    #[must_use]
    pub fn from_default(default: &str) -> Self {
        if default.is_empty() {
            Self::Empty
        } else {
            Self::Text(default.to_string())
        }
    }

    /// Whether the value counts as absent for the required check.
    ///
    /// Blank text, an unchecked toggle, and zero are all treated as absent.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Text(s) => s.is_empty(),
            Value::Bool(b) => !b,
            Value::Number(n) => *n == 0.0 || n.is_nan(),
        }
    }

    /// Borrow the text content, if this is a text value
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Truthiness for conditional formulas
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        !self.is_missing()
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Number(n) => {
                // Integral results print without a fractional part, so that
                // "2" + "3" surfaces as "5" rather than "5.0".
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::Text(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_display_without_fraction() {
        assert_eq!(Value::Number(5.0).to_string(), "5");
        assert_eq!(Value::Number(-2.0).to_string(), "-2");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
    }

    #[test]
    fn empty_displays_as_empty_string() {
        assert_eq!(Value::Empty.to_string(), "");
    }

    #[test]
    fn missing_values() {
        assert!(Value::Empty.is_missing());
        assert!(Value::text("").is_missing());
        assert!(Value::Bool(false).is_missing());
        assert!(Value::Number(0.0).is_missing());
        assert!(!Value::text("x").is_missing());
        assert!(!Value::Number(1.0).is_missing());
    }

    #[test]
    fn from_default_maps_empty_to_empty() {
        assert_eq!(Value::from_default(""), Value::Empty);
        assert_eq!(Value::from_default("hi"), Value::text("hi"));
    }
}
