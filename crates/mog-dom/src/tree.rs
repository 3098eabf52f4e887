#![forbid(unsafe_code)]

//! The in-memory tree.
//!
//! # Invariants
//!
//! 1. Nodes are never removed; a [`NodeId`] stays valid for the tree's lifetime.
//! 2. Document order is insertion order.
//! 3. At most one node has focus.
//! 4. Listeners run with no internal borrow held, in attachment order.
//! 5. Only the simulation methods deliver notifications.
//!
//! # Failure Modes
//!
//! Unknown node ids are tolerated everywhere: reads return empty defaults
//! and writes are ignored.

use std::cell::RefCell;

use mog_core::{ControlKind, HostTree, Listener, ListenerId, MarkedAttribute, NodeId, Notification};

use crate::element::Element;

struct Node {
    element: Element,
    listeners: Vec<(ListenerId, Notification, Listener)>,
}

#[derive(Default)]
struct TreeState {
    nodes: Vec<Node>,
    focused: Option<NodeId>,
    next_listener: u64,
}

impl TreeState {
    fn node(&self, id: NodeId) -> Option<&Node> {
        usize::try_from(id.raw()).ok().and_then(|i| self.nodes.get(i))
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        usize::try_from(id.raw())
            .ok()
            .and_then(|i| self.nodes.get_mut(i))
    }

    fn element(&self, id: NodeId) -> Option<&Element> {
        self.node(id).map(|n| &n.element)
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.node_mut(id).map(|n| &mut n.element)
    }

    /// Check `id`, unchecking radios that share its group.
    fn check(&mut self, id: NodeId) {
        let Some(el) = self.element(id) else {
            return;
        };
        let group = (el.control_kind() == ControlKind::Radio)
            .then(|| el.attribute("name").map(str::to_owned))
            .flatten();

        if let Some(group) = group {
            for other in &mut self.nodes {
                let el = &mut other.element;
                if el.control_kind() == ControlKind::Radio && el.attribute("name") == Some(group.as_str())
                {
                    el.checked = false;
                }
            }
        }
        if let Some(el) = self.element_mut(id) {
            el.checked = true;
        }
    }
}

/// A deterministic, single-threaded [`HostTree`].
#[derive(Default)]
pub struct MemoryTree {
    state: RefCell<TreeState>,
}

impl MemoryTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element at the end of the document.
    pub fn append(&self, element: Element) -> NodeId {
        let mut state = self.state.borrow_mut();
        let id = NodeId::from_raw(state.nodes.len() as u64);
        state.nodes.push(Node {
            element,
            listeners: Vec::new(),
        });
        id
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().nodes.len()
    }

    /// Whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().nodes.is_empty()
    }

    /// Set or replace an attribute on an existing node.
    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        if let Some(el) = state.element_mut(node) {
            let updated = std::mem::take(el).attr(name, value);
            *el = updated;
        }
    }

    // --- reads -----------------------------------------------------------

    /// Current control value.
    #[must_use]
    pub fn value_of(&self, node: NodeId) -> String {
        self.value(node)
    }

    /// Current text content.
    #[must_use]
    pub fn text_of(&self, node: NodeId) -> String {
        self.state
            .borrow()
            .element(node)
            .map(|el| el.text.clone())
            .unwrap_or_default()
    }

    /// Whether a checkbox or radio is checked.
    #[must_use]
    pub fn checked(&self, node: NodeId) -> bool {
        self.is_checked(node)
    }

    /// Texts of the selected options.
    #[must_use]
    pub fn selection_of(&self, node: NodeId) -> Vec<String> {
        self.selected_texts(node)
    }

    /// The focused node, if any.
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.state.borrow().focused
    }

    /// Number of listeners attached to `node`.
    #[must_use]
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.state
            .borrow()
            .node(node)
            .map_or(0, |n| n.listeners.len())
    }

    // --- user simulation -------------------------------------------------

    /// Give `node` input focus.
    pub fn focus(&self, node: NodeId) {
        self.state.borrow_mut().focused = Some(node);
    }

    /// Clear input focus.
    pub fn blur(&self) {
        self.state.borrow_mut().focused = None;
    }

    /// The user replaces a text control's contents, then releases a key.
    pub fn type_text(&self, node: NodeId, text: &str) {
        tracing::trace!(node = %node, text, "memory tree: type");
        self.set_value(node, text);
        self.dispatch(node, Notification::Keyup);
    }

    /// The user clicks a checkbox.
    pub fn toggle(&self, node: NodeId) {
        {
            let mut state = self.state.borrow_mut();
            let Some(el) = state.element_mut(node) else {
                return;
            };
            el.checked = !el.checked;
        }
        tracing::trace!(node = %node, "memory tree: toggle");
        self.dispatch(node, Notification::Change);
    }

    /// The user checks a checkbox or radio; radios in the same group uncheck.
    ///
    /// Only `node` receives a `change` notification.
    pub fn check(&self, node: NodeId) {
        self.state.borrow_mut().check(node);
        tracing::trace!(node = %node, "memory tree: check");
        self.dispatch(node, Notification::Change);
    }

    /// The user picks options of a select by text.
    pub fn choose(&self, node: NodeId, texts: &[&str]) {
        self.select_texts(node, texts);
        tracing::trace!(node = %node, ?texts, "memory tree: choose");
        self.dispatch(node, Notification::Change);
    }

    /// Deliver `notification` to every matching listener on `node`.
    pub fn dispatch(&self, node: NodeId, notification: Notification) {
        let listeners: Vec<Listener> = self
            .state
            .borrow()
            .node(node)
            .map(|n| {
                n.listeners
                    .iter()
                    .filter(|(_, kind, _)| *kind == notification)
                    .map(|(_, _, l)| Listener::clone(l))
                    .collect()
            })
            .unwrap_or_default();

        for listener in listeners {
            listener();
        }
    }
}

impl std::fmt::Debug for MemoryTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MemoryTree")
            .field("nodes", &state.nodes.len())
            .field("focused", &state.focused)
            .finish()
    }
}

impl HostTree for MemoryTree {
    fn marked_attributes(&self, prefix: &str) -> Vec<MarkedAttribute> {
        let state = self.state.borrow();
        state
            .nodes
            .iter()
            .enumerate()
            .flat_map(|(i, n)| {
                let node = NodeId::from_raw(i as u64);
                n.element
                    .attributes
                    .iter()
                    .filter(|(name, _)| name.starts_with(prefix))
                    .map(move |(name, value)| MarkedAttribute {
                        node,
                        name: name.clone(),
                        value: value.clone(),
                    })
            })
            .collect()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.state
            .borrow()
            .element(node)
            .and_then(|el| el.attribute(name).map(str::to_owned))
    }

    fn control_kind(&self, node: NodeId) -> ControlKind {
        self.state
            .borrow()
            .element(node)
            .map(Element::control_kind)
            .unwrap_or_default()
    }

    fn value(&self, node: NodeId) -> String {
        self.state
            .borrow()
            .element(node)
            .map(|el| el.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&self, node: NodeId, value: &str) {
        if let Some(el) = self.state.borrow_mut().element_mut(node) {
            el.value.clear();
            el.value.push_str(value);
        }
    }

    fn is_checked(&self, node: NodeId) -> bool {
        self.state
            .borrow()
            .element(node)
            .is_some_and(|el| el.checked)
    }

    fn set_checked(&self, node: NodeId, checked: bool) {
        let mut state = self.state.borrow_mut();
        if checked {
            state.check(node);
        } else if let Some(el) = state.element_mut(node) {
            el.checked = false;
        }
    }

    fn selected_texts(&self, node: NodeId) -> Vec<String> {
        self.state
            .borrow()
            .element(node)
            .map(|el| {
                el.options
                    .iter()
                    .filter(|o| o.selected)
                    .map(|o| o.text.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn select_texts(&self, node: NodeId, texts: &[&str]) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(el) = state.element_mut(node) else {
            return false;
        };
        if !el.options.iter().any(|o| texts.contains(&o.text.as_str())) {
            return false;
        }

        let multiple = el.multiple;
        let mut picked_one = false;
        for opt in &mut el.options {
            let wanted = texts.contains(&opt.text.as_str());
            opt.selected = if multiple {
                wanted
            } else if wanted && !picked_one {
                picked_one = true;
                true
            } else {
                false
            };
        }
        true
    }

    fn set_text_content(&self, node: NodeId, text: &str) {
        if let Some(el) = self.state.borrow_mut().element_mut(node) {
            el.text.clear();
            el.text.push_str(text);
        }
    }

    fn has_focus(&self, node: NodeId) -> bool {
        self.state.borrow().focused == Some(node)
    }

    fn listen(&self, node: NodeId, notification: Notification, listener: Listener) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId::from_raw(state.next_listener);
        state.next_listener += 1;
        if let Some(n) = state.node_mut(node) {
            n.listeners.push((id, notification, listener));
        }
        id
    }

    fn unlisten(&self, node: NodeId, id: ListenerId) {
        if let Some(n) = self.state.borrow_mut().node_mut(node) {
            n.listeners.retain(|(lid, _, _)| *lid != id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::OptionElement;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter(tree: &MemoryTree, node: NodeId, kind: Notification) -> Rc<Cell<u32>> {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        tree.listen(node, kind, Rc::new(move || h.set(h.get() + 1)));
        hits
    }

    #[test]
    fn marked_attributes_in_document_order() {
        let tree = MemoryTree::new();
        let a = tree.append(Element::text_input().attr("data-mog-input", "user[a]"));
        tree.append(Element::span().attr("class", "plain"));
        let c = tree.append(
            Element::span()
                .attr("data-mog-output", "user[a]")
                .attr("data-mog-input", "user[c]"),
        );

        let found: Vec<_> = tree
            .marked_attributes("data-mog-")
            .into_iter()
            .map(|m| (m.node, m.name, m.value))
            .collect();
        assert_eq!(
            found,
            vec![
                (a, "data-mog-input".to_string(), "user[a]".to_string()),
                (c, "data-mog-output".to_string(), "user[a]".to_string()),
                (c, "data-mog-input".to_string(), "user[c]".to_string()),
            ]
        );
    }

    #[test]
    fn programmatic_writes_are_silent() {
        let tree = MemoryTree::new();
        let input = tree.append(Element::text_input());
        let hits = counter(&tree, input, Notification::Keyup);

        tree.set_value(input, "quiet");
        assert_eq!(hits.get(), 0);

        tree.type_text(input, "loud");
        assert_eq!(hits.get(), 1);
        assert_eq!(tree.value_of(input), "loud");
    }

    #[test]
    fn dispatch_filters_by_notification() {
        let tree = MemoryTree::new();
        let boxed = tree.append(Element::checkbox("yes"));
        let changes = counter(&tree, boxed, Notification::Change);
        let keyups = counter(&tree, boxed, Notification::Keyup);

        tree.toggle(boxed);
        assert!(tree.checked(boxed));
        assert_eq!((changes.get(), keyups.get()), (1, 0));
    }

    #[test]
    fn checking_a_radio_unchecks_its_group_only() {
        let tree = MemoryTree::new();
        let a = tree.append(Element::radio("size", "s").checked());
        let b = tree.append(Element::radio("size", "m"));
        let other = tree.append(Element::radio("color", "red").checked());
        let b_hits = counter(&tree, b, Notification::Change);
        let a_hits = counter(&tree, a, Notification::Change);

        tree.check(b);
        assert!(!tree.checked(a));
        assert!(tree.checked(b));
        assert!(tree.checked(other));
        assert_eq!((a_hits.get(), b_hits.get()), (0, 1));
    }

    #[test]
    fn select_one_keeps_single_selection() {
        let tree = MemoryTree::new();
        let sel = tree.append(Element::select([
            OptionElement::new("Red").selected(),
            OptionElement::new("Blue"),
        ]));

        assert!(tree.select_texts(sel, &["Blue", "Red"]));
        assert_eq!(tree.selection_of(sel), vec!["Red".to_string()]);

        assert!(!tree.select_texts(sel, &["Green"]));
        assert_eq!(tree.selection_of(sel), vec!["Red".to_string()]);
    }

    #[test]
    fn multi_select_selects_every_match() {
        let tree = MemoryTree::new();
        let sel = tree.append(Element::multi_select([
            OptionElement::new("Red"),
            OptionElement::new("Green").selected(),
            OptionElement::new("Blue"),
        ]));

        tree.choose(sel, &["Red", "Blue"]);
        assert_eq!(
            tree.selection_of(sel),
            vec!["Red".to_string(), "Blue".to_string()]
        );
    }

    #[test]
    fn unlisten_detaches() {
        let tree = MemoryTree::new();
        let input = tree.append(Element::text_input());
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let id = tree.listen(input, Notification::Keyup, Rc::new(move || h.set(h.get() + 1)));
        assert_eq!(tree.listener_count(input), 1);

        tree.unlisten(input, id);
        tree.type_text(input, "x");
        assert_eq!(hits.get(), 0);
        assert_eq!(tree.listener_count(input), 0);
    }

    #[test]
    fn listeners_may_reenter_the_tree() {
        let tree = Rc::new(MemoryTree::new());
        let input = tree.append(Element::text_input());
        let mirror = tree.append(Element::span());
        let t = Rc::clone(&tree);
        tree.listen(
            input,
            Notification::Keyup,
            Rc::new(move || t.set_text_content(mirror, &t.value(input))),
        );

        tree.type_text(input, "echo");
        assert_eq!(tree.text_of(mirror), "echo");
    }

    #[test]
    fn unknown_nodes_are_tolerated() {
        let tree = MemoryTree::new();
        let ghost = NodeId::from_raw(42);
        tree.set_value(ghost, "x");
        tree.toggle(ghost);
        assert_eq!(tree.value_of(ghost), "");
        assert!(!tree.checked(ghost));
        assert_eq!(tree.control_kind(ghost), ControlKind::Text);
    }

    #[test]
    fn focus_is_exclusive() {
        let tree = MemoryTree::new();
        let a = tree.append(Element::text_input());
        let b = tree.append(Element::text_input());
        tree.focus(a);
        tree.focus(b);
        assert!(!tree.has_focus(a));
        assert!(tree.has_focus(b));
        tree.blur();
        assert_eq!(tree.focused(), None);
    }
}
