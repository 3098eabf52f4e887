#![forbid(unsafe_code)]

//! Lifecycle of listeners a model attaches to its host tree.
//!
//! # Invariants
//!
//! 1. Listeners are detached in reverse attachment order.
//! 2. After `clear()` or drop, no listener held by this scope is attached.
//! 3. `len()` is always the number of listeners still attached.

use std::fmt;
use std::rc::Rc;

use mog_core::{HostTree, ListenerId, NodeId};

/// Holds the listeners a model attached; detaches them on `clear()` or drop.
pub struct ListenerScope {
    tree: Rc<dyn HostTree>,
    attached: Vec<(NodeId, ListenerId)>,
}

impl ListenerScope {
    /// Create an empty scope over `tree`.
    #[must_use]
    pub fn new(tree: Rc<dyn HostTree>) -> Self {
        Self {
            tree,
            attached: Vec::new(),
        }
    }

    /// Track a listener that was attached to `node`.
    pub fn hold(&mut self, node: NodeId, id: ListenerId) {
        self.attached.push((node, id));
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attached.len()
    }

    /// Whether nothing is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    /// Detach every listener now; the scope stays usable.
    pub fn clear(&mut self) {
        while let Some((node, id)) = self.attached.pop() {
            self.tree.unlisten(node, id);
        }
    }
}

impl Drop for ListenerScope {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for ListenerScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerScope")
            .field("listener_count", &self.attached.len())
            .finish()
    }
}
