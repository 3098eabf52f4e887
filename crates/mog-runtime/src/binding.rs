#![forbid(unsafe_code)]

//! Bindings and the table that owns them.
//!
//! A [`Binding`] pairs one element with one role, one property, and the
//! marshaller resolved for that element. Bindings are immutable once made;
//! only the element's own live state changes.
//!
//! # Invariants
//!
//! 1. An element appears at most once per `(role, property)` pair.
//! 2. Every `(role, property)` entry in the table is non-empty.
//! 3. Every binding carries its discovery sequence number; per-property
//!    views across roles ([`BindingTable::for_property`],
//!    [`BindingTable::grouped_by_property`]) are in discovery order, not
//!    role order.

use std::rc::Rc;

use ahash::{AHashMap, AHashSet};
use mog_core::{HostTree, NodeId, Value};

use crate::marshal::Marshaller;

/// One element bound to one property through one role.
#[derive(Debug, Clone)]
pub struct Binding {
    node: NodeId,
    role: Rc<str>,
    property: Rc<str>,
    marshaller: Marshaller,
    checkable: bool,
    seq: u64,
}

impl Binding {
    /// Create a binding; checkability follows the marshaller's control kind.
    #[must_use]
    pub fn new(
        node: NodeId,
        role: impl Into<Rc<str>>,
        property: impl Into<Rc<str>>,
        marshaller: Marshaller,
    ) -> Self {
        Self {
            node,
            role: role.into(),
            property: property.into(),
            checkable: marshaller.kind().is_checkable(),
            marshaller,
            seq: 0,
        }
    }

    /// The bound element.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Name of the role this binding was made for.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// The bound property key.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The element's read/write strategy.
    #[must_use]
    pub const fn marshaller(&self) -> &Marshaller {
        &self.marshaller
    }

    /// Whether the element is a checkbox or radio.
    #[must_use]
    pub const fn is_checkable(&self) -> bool {
        self.checkable
    }
}

/// Resolve one property from its bindings, last one wins.
///
/// Unchecked checkables are skipped, so among checkables the last checked
/// element decides, or null if none is checked. A non-checkable element
/// always overrides whatever came before it.
#[must_use]
pub fn resolve_last_wins(tree: &dyn HostTree, bindings: &[Binding]) -> Value {
    bindings.iter().fold(Value::Null, |current, binding| {
        if binding.is_checkable() && !tree.is_checked(binding.node()) {
            return current;
        }
        binding
            .marshaller()
            .read(tree, binding.node())
            .unwrap_or(current)
    })
}

type PropertyBindings = AHashMap<Rc<str>, Vec<Binding>>;

/// Bindings grouped by role, then by property.
#[derive(Debug, Default)]
pub struct BindingTable {
    roles: Vec<(Rc<str>, PropertyBindings)>,
    /// `(role, property)` pairs each node is bound to.
    bound: AHashMap<NodeId, Vec<(Rc<str>, Rc<str>)>>,
    len: usize,
    next_seq: u64,
}

impl BindingTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `node` is already bound to `property` through `role`.
    #[must_use]
    pub fn contains(&self, node: NodeId, role: &str, property: &str) -> bool {
        self.bound.get(&node).is_some_and(|pairs| {
            pairs
                .iter()
                .any(|(r, p)| &**r == role && &**p == property)
        })
    }

    /// Add a binding. Returns `false` and drops it if the element is
    /// already bound to the same `(role, property)`.
    pub fn insert(&mut self, mut binding: Binding) -> bool {
        if self.contains(binding.node, &binding.role, &binding.property) {
            return false;
        }
        self.bound
            .entry(binding.node)
            .or_default()
            .push((Rc::clone(&binding.role), Rc::clone(&binding.property)));
        self.len += 1;
        binding.seq = self.next_seq;
        self.next_seq += 1;

        let slot = match self
            .roles
            .iter()
            .position(|(role, _)| *role == binding.role)
        {
            Some(i) => &mut self.roles[i].1,
            None => {
                self.roles
                    .push((Rc::clone(&binding.role), PropertyBindings::default()));
                let last = self.roles.len() - 1;
                &mut self.roles[last].1
            }
        };
        slot.entry(Rc::clone(&binding.property))
            .or_default()
            .push(binding);
        true
    }

    /// Bindings for `property` under `role`, in discovery order.
    #[must_use]
    pub fn get(&self, role: &str, property: &str) -> &[Binding] {
        self.roles
            .iter()
            .find(|(r, _)| &**r == role)
            .and_then(|(_, props)| props.get(property))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Bindings for `property` across every role, in discovery order.
    #[must_use]
    pub fn for_property(&self, property: &str) -> Vec<Binding> {
        let mut found: Vec<Binding> = self
            .roles
            .iter()
            .filter_map(|(_, props)| props.get(property))
            .flatten()
            .cloned()
            .collect();
        found.sort_by_key(|b| b.seq);
        found
    }

    /// Every bound property key across every role, deduplicated.
    #[must_use]
    pub fn properties(&self) -> Vec<Rc<str>> {
        let mut seen = AHashSet::new();
        self.roles
            .iter()
            .flat_map(|(_, props)| props.keys())
            .filter(|p| seen.insert(Rc::clone(p)))
            .cloned()
            .collect()
    }

    /// Bindings of roles accepted by `include`, grouped per property.
    ///
    /// Each group is in discovery order, whichever role its members use.
    #[must_use]
    pub fn grouped_by_property(
        &self,
        include: impl Fn(&str) -> bool,
    ) -> Vec<(Rc<str>, Vec<Binding>)> {
        let mut groups: Vec<(Rc<str>, Vec<Binding>)> = Vec::new();
        for (role, props) in &self.roles {
            if !include(role) {
                continue;
            }
            for (property, bindings) in props {
                match groups.iter_mut().find(|(p, _)| p == property) {
                    Some((_, group)) => group.extend(bindings.iter().cloned()),
                    None => groups.push((Rc::clone(property), bindings.clone())),
                }
            }
        }
        for (_, group) in &mut groups {
            group.sort_by_key(|b| b.seq);
        }
        groups
    }

    /// Total number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table holds no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Forget every binding.
    pub fn clear(&mut self) {
        self.roles.clear();
        self.bound.clear();
        self.len = 0;
    }
}
