#![forbid(unsafe_code)]

//! Control kinds.
//!
//! Every bindable element is classified into exactly one [`ControlKind`].
//! Anything that is not a checkbox, radio, or select is treated as
//! [`ControlKind::Text`], the generic fallback.

/// The shape of a bindable control, decided once when a binding is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlKind {
    /// Free text (`<input>`, `<textarea>`, or any non-form element).
    #[default]
    Text,
    /// `<input type="checkbox">`.
    Checkbox,
    /// `<input type="radio">`.
    Radio,
    /// `<select>` without `multiple`.
    SelectOne,
    /// `<select multiple>`.
    SelectMultiple,
}

impl ControlKind {
    /// Classify an element from its tag name and `type`/`multiple` shape.
    ///
    /// ```
    /// use mog_core::ControlKind;
    ///
    /// assert_eq!(ControlKind::classify("input", Some("checkbox"), false), ControlKind::Checkbox);
    /// assert_eq!(ControlKind::classify("select", None, true), ControlKind::SelectMultiple);
    /// assert_eq!(ControlKind::classify("textarea", None, false), ControlKind::Text);
    /// ```
    #[must_use]
    pub fn classify(tag: &str, input_type: Option<&str>, multiple: bool) -> Self {
        if tag.eq_ignore_ascii_case("select") {
            return if multiple {
                Self::SelectMultiple
            } else {
                Self::SelectOne
            };
        }
        if !tag.eq_ignore_ascii_case("input") {
            return Self::Text;
        }
        match input_type {
            Some(t) if t.eq_ignore_ascii_case("checkbox") => Self::Checkbox,
            Some(t) if t.eq_ignore_ascii_case("radio") => Self::Radio,
            _ => Self::Text,
        }
    }

    /// Checkboxes and radios: their value only counts while checked.
    #[must_use]
    pub const fn is_checkable(self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }

    /// Discrete controls report edits through `change`; text reports through `keyup`.
    #[must_use]
    pub const fn is_discrete(self) -> bool {
        !matches!(self, Self::Text)
    }
}
