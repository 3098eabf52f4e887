#![forbid(unsafe_code)]

//! Declarative binding markers.
//!
//! A marker is the value of a binding attribute, written `model[property]`.
//! The property is everything between the first `[` and the final `]`, so
//! `form[address[street]]` names the property `address[street]`.
//!
//! # Failure Modes
//!
//! | Input | Reason |
//! |-------|--------|
//! | `user.email` | [`MarkerParseReason::MissingOpenBracket`] |
//! | `user[email` | [`MarkerParseReason::MissingCloseBracket`] |
//! | `user[email]x` | [`MarkerParseReason::TrailingInput`] |
//! | `[email]` | [`MarkerParseReason::EmptyModel`] |
//! | `user[]` | [`MarkerParseReason::EmptyProperty`] |

use std::fmt;
use std::str::FromStr;

/// Why a marker could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerParseReason {
    /// No `[` in the marker.
    MissingOpenBracket,
    /// No `]` after the first `[`.
    MissingCloseBracket,
    /// Characters follow the final `]`.
    TrailingInput,
    /// Nothing before the first `[`.
    EmptyModel,
    /// Nothing between the brackets.
    EmptyProperty,
}

impl fmt::Display for MarkerParseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingOpenBracket => "missing '['",
            Self::MissingCloseBracket => "missing ']'",
            Self::TrailingInput => "unexpected input after ']'",
            Self::EmptyModel => "empty model name",
            Self::EmptyProperty => "empty property name",
        })
    }
}

/// A marker value that is not of the form `model[property]`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed marker '{value}': {reason}")]
pub struct MarkerParseError {
    /// The raw attribute value.
    pub value: String,
    /// What was wrong with it.
    pub reason: MarkerParseReason,
}

/// A parsed `model[property]` marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Marker {
    /// Model namespace the marker belongs to.
    pub model: String,
    /// Property key within that model.
    pub property: String,
}

impl Marker {
    /// Parse a raw marker value.
    ///
    /// # Errors
    ///
    /// Returns [`MarkerParseError`] when the value is not `model[property]`.
    ///
    /// ```
    /// use mog_core::Marker;
    ///
    /// let marker = Marker::parse("user[email]").unwrap();
    /// assert_eq!(marker.model, "user");
    /// assert_eq!(marker.property, "email");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, MarkerParseError> {
        let fail = |reason| MarkerParseError {
            value: raw.to_owned(),
            reason,
        };

        let open = raw
            .find('[')
            .ok_or_else(|| fail(MarkerParseReason::MissingOpenBracket))?;
        let close = raw
            .rfind(']')
            .filter(|&close| close > open)
            .ok_or_else(|| fail(MarkerParseReason::MissingCloseBracket))?;
        if close + 1 != raw.len() {
            return Err(fail(MarkerParseReason::TrailingInput));
        }

        let model = &raw[..open];
        let property = &raw[open + 1..close];
        if model.is_empty() {
            return Err(fail(MarkerParseReason::EmptyModel));
        }
        if property.is_empty() {
            return Err(fail(MarkerParseReason::EmptyProperty));
        }

        Ok(Self {
            model: model.to_owned(),
            property: property.to_owned(),
        })
    }

    /// Whether this marker belongs to `model`.
    #[must_use]
    pub fn belongs_to(&self, model: &str) -> bool {
        self.model == model
    }
}

impl FromStr for Marker {
    type Err = MarkerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.model, self.property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reason(raw: &str) -> MarkerParseReason {
        Marker::parse(raw).unwrap_err().reason
    }

    #[test]
    fn parses_simple_marker() {
        let m = Marker::parse("user[email]").unwrap();
        assert_eq!(m.model, "user");
        assert_eq!(m.property, "email");
        assert!(m.belongs_to("user"));
        assert!(!m.belongs_to("username"));
    }

    #[test]
    fn property_spans_first_open_to_final_close() {
        let m = Marker::parse("form[address[street]]").unwrap();
        assert_eq!(m.model, "form");
        assert_eq!(m.property, "address[street]");
    }

    #[test]
    fn rejects_malformed_markers() {
        assert_eq!(reason("user.email"), MarkerParseReason::MissingOpenBracket);
        assert_eq!(reason("user[email"), MarkerParseReason::MissingCloseBracket);
        assert_eq!(reason("user]email["), MarkerParseReason::MissingCloseBracket);
        assert_eq!(reason("user[email]x"), MarkerParseReason::TrailingInput);
        assert_eq!(reason("[email]"), MarkerParseReason::EmptyModel);
        assert_eq!(reason("user[]"), MarkerParseReason::EmptyProperty);
    }

    #[test]
    fn error_message_names_value() {
        let err = Marker::parse("oops").unwrap_err();
        assert_eq!(err.to_string(), "malformed marker 'oops': missing '['");
    }

    proptest! {
        #[test]
        fn display_parses_back(model in "[a-z][a-z0-9_]{0,8}", property in "[a-z][a-z0-9_.]{0,12}") {
            let marker = Marker { model, property };
            let reparsed: Marker = marker.to_string().parse().unwrap();
            prop_assert_eq!(reparsed, marker);
        }
    }
}
