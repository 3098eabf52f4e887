#![forbid(unsafe_code)]

//! Host-tree capabilities.
//!
//! The engine never reaches for an ambient document. Whatever owns the
//! markup (a browser DOM adapter, [`mog_dom::MemoryTree`], a test double)
//! implements [`HostTree`] and is handed to the model explicitly.
//!
//! All methods take `&self`: the tree is a shared resource that both the
//! engine and the host mutate, so implementations use interior mutability.
//!
//! # Contract
//!
//! 1. Programmatic writes (`set_value`, `set_checked`, `select_texts`,
//!    `set_text_content`) never deliver notifications. Only user
//!    interaction does.
//! 2. A tree must not hold any internal borrow while invoking a listener;
//!    listeners re-enter the tree synchronously.
//! 3. [`HostTree::marked_attributes`] returns results in document order.
//!
//! [`mog_dom::MemoryTree`]: https://docs.rs/mog-dom

use std::fmt;
use std::rc::Rc;

use crate::control::ControlKind;

/// Opaque handle to an element in a host tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Wrap a host-specific raw identifier.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// User-interaction notifications a node can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    /// A discrete control committed a new state.
    Change,
    /// A continuous text control was edited.
    Keyup,
}

impl Notification {
    /// The notification a control of `kind` reports edits through.
    #[must_use]
    pub const fn for_control(kind: ControlKind) -> Self {
        if kind.is_discrete() {
            Self::Change
        } else {
            Self::Keyup
        }
    }
}

/// Handle returned by [`HostTree::listen`], used to detach the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wrap a host-specific raw identifier.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Callback invoked when a node delivers a notification.
pub type Listener = Rc<dyn Fn()>;

/// One binding attribute found on a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedAttribute {
    /// The node carrying the attribute.
    pub node: NodeId,
    /// Full attribute name, e.g. `data-mog-input`.
    pub name: String,
    /// Raw attribute value, e.g. `user[email]`.
    pub value: String,
}

/// What the binding engine needs from a markup tree.
pub trait HostTree {
    /// Every attribute whose name starts with `prefix`, in document order.
    fn marked_attributes(&self, prefix: &str) -> Vec<MarkedAttribute>;

    /// Read an attribute.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// The control shape of `node`.
    fn control_kind(&self, node: NodeId) -> ControlKind;

    /// Current `value` of a form control (its own value for checkables).
    fn value(&self, node: NodeId) -> String;

    /// Overwrite the `value` of a form control.
    fn set_value(&self, node: NodeId, value: &str);

    /// Whether a checkbox or radio is checked.
    fn is_checked(&self, node: NodeId) -> bool;

    /// Check or uncheck a checkbox or radio.
    fn set_checked(&self, node: NodeId, checked: bool);

    /// Texts of the selected options of a select, in option order.
    fn selected_texts(&self, node: NodeId) -> Vec<String>;

    /// Select exactly the options whose text is in `texts`.
    ///
    /// Returns `false` (leaving the selection unchanged) when no option matches.
    fn select_texts(&self, node: NodeId, texts: &[&str]) -> bool;

    /// Replace the displayed text content of a node.
    fn set_text_content(&self, node: NodeId, text: &str);

    /// Whether `node` currently holds input focus.
    fn has_focus(&self, node: NodeId) -> bool;

    /// Attach a listener for `notification` on `node`.
    fn listen(&self, node: NodeId, notification: Notification, listener: Listener) -> ListenerId;

    /// Detach a listener. Unknown ids are ignored.
    fn unlisten(&self, node: NodeId, id: ListenerId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_follows_control_kind() {
        assert_eq!(
            Notification::for_control(ControlKind::Text),
            Notification::Keyup
        );
        for kind in [
            ControlKind::Checkbox,
            ControlKind::Radio,
            ControlKind::SelectOne,
            ControlKind::SelectMultiple,
        ] {
            assert_eq!(Notification::for_control(kind), Notification::Change);
        }
    }

    #[test]
    fn node_id_round_trips_raw() {
        let id = NodeId::from_raw(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(id.to_string(), "#7");
    }
}
