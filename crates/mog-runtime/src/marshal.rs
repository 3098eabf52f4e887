#![forbid(unsafe_code)]

//! Value marshalling between controls and properties.
//!
//! A [`Marshaller`] is resolved once per binding from the element's
//! [`ControlKind`] and reused for every read and write.
//!
//! | Kind | Read | Write |
//! |------|------|-------|
//! | text | current value | assign value, unless focused (focus guard) |
//! | checkbox | own value if checked, else null | checked = value equals own value |
//! | radio | own value if checked, else nothing | checked = value equals own value |
//! | single-select | text of the selected option, null if none | select the option with that text |
//! | multi-select | selected texts joined by the list separator | split and select matching texts |

use std::rc::Rc;

use mog_core::{ControlKind, HostTree, NodeId, Value};

use crate::config::SyncConfig;

/// Read/write strategy for one bound control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marshaller {
    kind: ControlKind,
    separator: Rc<str>,
    focus_guard: bool,
}

impl Marshaller {
    /// Resolve the strategy for a control of `kind`.
    #[must_use]
    pub fn new(kind: ControlKind, config: &SyncConfig) -> Self {
        Self {
            kind,
            separator: Rc::from(config.list_separator.as_str()),
            focus_guard: config.focus_guard,
        }
    }

    /// The control kind this strategy was resolved for.
    #[must_use]
    pub const fn kind(&self) -> ControlKind {
        self.kind
    }

    /// Read the control's value.
    ///
    /// `None` means the control contributes nothing (an unchecked radio).
    #[must_use]
    pub fn read(&self, tree: &dyn HostTree, node: NodeId) -> Option<Value> {
        match self.kind {
            ControlKind::Text => Some(Value::Text(tree.value(node))),
            ControlKind::Checkbox => Some(if tree.is_checked(node) {
                Value::Text(tree.value(node))
            } else {
                Value::Null
            }),
            ControlKind::Radio => tree
                .is_checked(node)
                .then(|| Value::Text(tree.value(node))),
            ControlKind::SelectOne => Some(
                tree.selected_texts(node)
                    .into_iter()
                    .next()
                    .map_or(Value::Null, Value::Text),
            ),
            ControlKind::SelectMultiple => Some(Value::Text(
                tree.selected_texts(node).join(&*self.separator),
            )),
        }
    }

    /// Write `value` into the control. Returns whether the control was touched.
    pub fn write(&self, tree: &dyn HostTree, node: NodeId, value: &Value) -> bool {
        match self.kind {
            ControlKind::Text => {
                if self.focus_guard && tree.has_focus(node) {
                    tracing::trace!(node = %node, "focus guard: keeping in-progress edit");
                    return false;
                }
                tree.set_value(node, value.display_text());
                true
            }
            ControlKind::Checkbox | ControlKind::Radio => {
                let own = tree.value(node);
                tree.set_checked(node, value.as_text() == Some(own.as_str()));
                true
            }
            ControlKind::SelectOne => value
                .as_text()
                .is_some_and(|text| tree.select_texts(node, &[text])),
            ControlKind::SelectMultiple => value.as_text().is_some_and(|joined| {
                let texts: Vec<&str> = joined.split(&*self.separator).collect();
                tree.select_texts(node, &texts)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mog_dom::{Element, MemoryTree, OptionElement};

    fn marshaller(tree: &MemoryTree, node: NodeId) -> Marshaller {
        Marshaller::new(tree.control_kind(node), &SyncConfig::default())
    }

    #[test]
    fn text_reads_and_writes_value() {
        let tree = MemoryTree::new();
        let node = tree.append(Element::text_input().value("hello"));
        let m = marshaller(&tree, node);

        assert_eq!(m.read(&tree, node), Some(Value::text("hello")));
        assert!(m.write(&tree, node, &Value::text("bye")));
        assert_eq!(tree.value_of(node), "bye");

        m.write(&tree, node, &Value::Null);
        assert_eq!(tree.value_of(node), "");
    }

    #[test]
    fn focus_guard_protects_edit_in_progress() {
        let tree = MemoryTree::new();
        let node = tree.append(Element::text_input().value("typing"));
        tree.focus(node);

        let guarded = marshaller(&tree, node);
        assert!(!guarded.write(&tree, node, &Value::text("x")));
        assert_eq!(tree.value_of(node), "typing");

        let unguarded = Marshaller::new(
            ControlKind::Text,
            &SyncConfig::default().with_focus_guard(false),
        );
        assert!(unguarded.write(&tree, node, &Value::text("x")));
        assert_eq!(tree.value_of(node), "x");
    }

    #[test]
    fn checkbox_reads_null_when_unchecked() {
        let tree = MemoryTree::new();
        let node = tree.append(Element::checkbox("yes"));
        let m = marshaller(&tree, node);

        assert_eq!(m.read(&tree, node), Some(Value::Null));
        tree.toggle(node);
        assert_eq!(m.read(&tree, node), Some(Value::text("yes")));
    }

    #[test]
    fn checkable_write_compares_own_value() {
        let tree = MemoryTree::new();
        let node = tree.append(Element::checkbox("yes").checked());
        let m = marshaller(&tree, node);

        m.write(&tree, node, &Value::text("no"));
        assert!(!tree.checked(node));
        m.write(&tree, node, &Value::text("yes"));
        assert!(tree.checked(node));
        m.write(&tree, node, &Value::Null);
        assert!(!tree.checked(node));
    }

    #[test]
    fn unchecked_radio_contributes_nothing() {
        let tree = MemoryTree::new();
        let node = tree.append(Element::radio("size", "m"));
        let m = marshaller(&tree, node);

        assert_eq!(m.read(&tree, node), None);
        tree.check(node);
        assert_eq!(m.read(&tree, node), Some(Value::text("m")));
    }

    #[test]
    fn select_one_uses_option_text_not_value() {
        let tree = MemoryTree::new();
        let node = tree.append(Element::select([
            OptionElement::new("Red").value("r"),
            OptionElement::new("Blue").value("b").selected(),
        ]));
        let m = marshaller(&tree, node);

        assert_eq!(m.read(&tree, node), Some(Value::text("Blue")));
        assert!(m.write(&tree, node, &Value::text("Red")));
        assert_eq!(tree.selection_of(node), vec!["Red".to_string()]);
        assert!(!m.write(&tree, node, &Value::text("Green")));
        assert_eq!(tree.selection_of(node), vec!["Red".to_string()]);
    }

    #[test]
    fn select_one_without_selection_reads_null() {
        let tree = MemoryTree::new();
        let node = tree.append(Element::select([OptionElement::new("Red")]));
        assert_eq!(marshaller(&tree, node).read(&tree, node), Some(Value::Null));
    }

    #[test]
    fn multi_select_joins_and_splits() {
        let tree = MemoryTree::new();
        let node = tree.append(Element::multi_select([
            OptionElement::new("Red").selected(),
            OptionElement::new("Green"),
            OptionElement::new("Blue").selected(),
        ]));
        let m = marshaller(&tree, node);

        assert_eq!(m.read(&tree, node), Some(Value::text("Red, Blue")));
        assert!(m.write(&tree, node, &Value::text("Green, Blue")));
        assert_eq!(
            tree.selection_of(node),
            vec!["Green".to_string(), "Blue".to_string()]
        );
    }

    #[test]
    fn multi_select_honours_custom_separator() {
        let tree = MemoryTree::new();
        let node = tree.append(Element::multi_select([
            OptionElement::new("a").selected(),
            OptionElement::new("b").selected(),
        ]));
        let m = Marshaller::new(
            ControlKind::SelectMultiple,
            &SyncConfig::default().with_list_separator("|"),
        );
        assert_eq!(m.read(&tree, node), Some(Value::text("a|b")));
    }
}
