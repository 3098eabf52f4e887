#![forbid(unsafe_code)]

//! Element builders.

use mog_core::ControlKind;

/// One `<option>` of a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionElement {
    /// Displayed text.
    pub text: String,
    /// Underlying `value` attribute.
    pub value: String,
    /// Whether the option is selected.
    pub selected: bool,
}

impl OptionElement {
    /// An unselected option whose value equals its text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            value: text.clone(),
            text,
            selected: false,
        }
    }

    /// Set the underlying value attribute.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Mark the option selected.
    #[must_use]
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

/// A node in a [`MemoryTree`](crate::MemoryTree), built up before insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub(crate) tag: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) value: String,
    pub(crate) checked: bool,
    pub(crate) multiple: bool,
    pub(crate) options: Vec<OptionElement>,
    pub(crate) text: String,
}

impl Element {
    /// A bare element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// `<input type="...">`.
    #[must_use]
    pub fn input(input_type: &str) -> Self {
        Self::new("input").attr("type", input_type)
    }

    /// `<input type="text">`.
    #[must_use]
    pub fn text_input() -> Self {
        Self::input("text")
    }

    /// `<textarea>`.
    #[must_use]
    pub fn textarea() -> Self {
        Self::new("textarea")
    }

    /// `<input type="checkbox" value="...">`.
    #[must_use]
    pub fn checkbox(value: impl Into<String>) -> Self {
        Self::input("checkbox").value(value)
    }

    /// `<input type="radio" name="..." value="...">`.
    #[must_use]
    pub fn radio(group: &str, value: impl Into<String>) -> Self {
        Self::input("radio").attr("name", group).value(value)
    }

    /// `<select>` with the given options.
    #[must_use]
    pub fn select(options: impl IntoIterator<Item = OptionElement>) -> Self {
        Self {
            options: options.into_iter().collect(),
            ..Self::new("select")
        }
    }

    /// `<select multiple>` with the given options.
    #[must_use]
    pub fn multi_select(options: impl IntoIterator<Item = OptionElement>) -> Self {
        Self {
            multiple: true,
            ..Self::select(options)
        }
    }

    /// `<span>`, typically an output.
    #[must_use]
    pub fn span() -> Self {
        Self::new("span")
    }

    /// Set an attribute, replacing any previous value.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Set the control value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Mark a checkbox or radio checked.
    #[must_use]
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// The element's tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Read an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Classify the element for value marshalling.
    #[must_use]
    pub fn control_kind(&self) -> ControlKind {
        ControlKind::classify(&self.tag, self.attribute("type"), self.multiple)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_replaces_existing() {
        let el = Element::span().attr("id", "a").attr("id", "b");
        assert_eq!(el.attribute("id"), Some("b"));
        assert_eq!(el.attributes.len(), 1);
    }

    #[test]
    fn builders_classify() {
        assert_eq!(Element::checkbox("x").control_kind(), ControlKind::Checkbox);
        assert_eq!(Element::radio("g", "x").control_kind(), ControlKind::Radio);
        assert_eq!(Element::select([]).control_kind(), ControlKind::SelectOne);
        assert_eq!(
            Element::multi_select([]).control_kind(),
            ControlKind::SelectMultiple
        );
        assert_eq!(Element::textarea().control_kind(), ControlKind::Text);
        assert_eq!(Element::span().control_kind(), ControlKind::Text);
    }

    #[test]
    fn option_value_defaults_to_text() {
        let opt = OptionElement::new("Red");
        assert_eq!(opt.value, "Red");
        assert_eq!(OptionElement::new("Red").value("r").value, "r");
    }
}
