#![forbid(unsafe_code)]

//! Property values.
//!
//! A stored property is either text or an explicit null. "Nothing stored
//! yet" is not a `Value`; lookups express it as `Option<Value>::None`, which
//! keeps it distinguishable from a stored null (an unchecked checkbox
//! legitimately stores null).

use std::fmt;

/// The payload of a bound property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Value {
    /// Explicit absence of a value (e.g. an unchecked checkbox).
    #[default]
    Null,
    /// Text content.
    Text(String),
}

impl Value {
    /// Create a text value.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Whether this is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the text, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Null => None,
            Self::Text(s) => Some(s.as_str()),
        }
    }

    /// The string shown when the value is displayed; null displays as empty.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.as_text().unwrap_or("")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_text() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_converts_to_null_or_text() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::text("x"));
    }

    #[test]
    fn null_displays_empty() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::text("hi").to_string(), "hi");
    }

    #[test]
    fn compares_against_str() {
        assert_eq!(Value::text("a"), "a");
        assert_ne!(Value::Null, "");
    }
}
