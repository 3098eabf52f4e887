#![forbid(unsafe_code)]

//! The sync engine.
//!
//! A [`Model`] owns one property store, the bindings discovered for its
//! namespace, and an event pipeline. It scans a [`HostTree`] for markers,
//! binds what it finds, and keeps store and elements consistent.
//!
//! # Binding lifecycle
//!
//! Discovered (marker parsed) → Bound (listener attached) → Active (takes
//! part in every get/set/push/pull). There is no way back short of
//! [`Model::unbind`]; an element removed from the host leaves its binding
//! dangling.
//!
//! # Invariants
//!
//! 1. Before and after every public call, store and elements agree per the
//!    last-wins rule; they diverge only while one `set` is propagating.
//! 2. `set` fully processes each key (store, push, trigger) before the next.
//! 3. `pull` writes the store directly and never triggers events.
//! 4. `push` never writes the store.
//! 5. No `RefCell` borrow is held while calling into the tree, a role, or a
//!    handler, so all of them may re-enter the model.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Malformed marker in this namespace | `sync` fails with [`SyncError::Marker`], nothing bound |
//! | Marker names an unregistered role | `sync` fails with [`ConfigurationError::UnknownRole`], nothing bound |
//! | `get` of a never-set property | `None` |
//! | Handler returns `Err` | Logged, other handlers run |
//! | Handler calls `set` on the property it observes | Unbounded recursion; caller's responsibility |

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use mog_core::{HostTree, Listener, Marker, NodeId, Notification, Value};

use crate::binding::{Binding, BindingTable, resolve_last_wins};
use crate::config::SyncConfig;
use crate::error::{ConfigurationError, HandlerResult, SyncError};
use crate::marshal::Marshaller;
use crate::pipeline::{self, Dispatch, EventPipeline};
use crate::role::{Role, RoleRegistry};
use crate::scope::ListenerScope;
use crate::store::PropertyStore;

/// What one [`Model::sync`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    /// Bindings created by this scan.
    pub created: usize,
    /// Markers skipped because the element was already bound.
    pub skipped: usize,
}

struct ModelInner {
    name: String,
    tree: Rc<dyn HostTree>,
    config: SyncConfig,
    roles: RefCell<Rc<RoleRegistry>>,
    store: RefCell<PropertyStore>,
    bindings: RefCell<BindingTable>,
    pipeline: RefCell<EventPipeline<Model>>,
    listeners: RefCell<ListenerScope>,
}

/// A bound namespace. Cloning yields another handle to the same model.
#[derive(Clone)]
pub struct Model {
    inner: Rc<ModelInner>,
}

impl Model {
    /// Create a model named `name` over `tree` with the default configuration.
    pub fn new(name: impl Into<String>, tree: Rc<dyn HostTree>) -> Self {
        Self::with_config(name, tree, SyncConfig::default())
    }

    /// Create a model with an explicit configuration.
    pub fn with_config(name: impl Into<String>, tree: Rc<dyn HostTree>, config: SyncConfig) -> Self {
        Self {
            inner: Rc::new(ModelInner {
                name: name.into(),
                listeners: RefCell::new(ListenerScope::new(Rc::clone(&tree))),
                tree,
                config,
                roles: RefCell::new(Rc::new(RoleRegistry::default())),
                store: RefCell::new(PropertyStore::new()),
                bindings: RefCell::new(BindingTable::new()),
                pipeline: RefCell::new(EventPipeline::new()),
            }),
        }
    }

    /// The model's namespace.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The configuration the model was created with.
    #[must_use]
    pub fn config(&self) -> &SyncConfig {
        &self.inner.config
    }

    /// The host tree the model is bound to.
    #[must_use]
    pub fn tree(&self) -> &Rc<dyn HostTree> {
        &self.inner.tree
    }

    /// Add a role. Takes effect for markers found by later scans.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::DuplicateRole`] if the name is taken.
    pub fn register_role(&self, role: Role) -> Result<&Self, ConfigurationError> {
        Rc::make_mut(&mut *self.inner.roles.borrow_mut()).register(role)?;
        Ok(self)
    }

    // --- sync ------------------------------------------------------------

    /// Scan the tree for this model's markers, bind new elements, then
    /// `pull` and `push`.
    ///
    /// Safe to call repeatedly: elements already bound for a
    /// `(role, property)` are skipped.
    ///
    /// # Errors
    ///
    /// [`SyncError`] for a malformed marker or an unknown role. Every
    /// marker is validated before anything is bound, so a failed scan
    /// leaves the model untouched.
    pub fn sync(&self) -> Result<SyncReport, SyncError> {
        let _span = tracing::debug_span!("mog.sync", model = %self.inner.name).entered();

        let discovered = self.discover()?;
        let mut report = SyncReport::default();
        for (node, role, property) in discovered {
            let known = self
                .inner
                .bindings
                .borrow()
                .contains(node, role.name(), &property);
            if known {
                report.skipped += 1;
                continue;
            }
            self.bind(node, role, property);
            report.created += 1;
        }
        tracing::debug!(
            created = report.created,
            skipped = report.skipped,
            "scan complete"
        );

        self.pull();
        self.push(None);
        Ok(report)
    }

    fn discover(&self) -> Result<Vec<(NodeId, Role, String)>, SyncError> {
        let prefix = self.inner.config.marker_prefix();
        let attributes = self.inner.tree.marked_attributes(&prefix);
        let roles = self.inner.roles.borrow();
        let mut found = Vec::new();

        for attr in attributes {
            if !self.owns_marker(&attr.value) {
                continue;
            }
            let Some(role_name) = attr.name.strip_prefix(prefix.as_str()) else {
                continue;
            };
            let marker = Marker::parse(&attr.value).map_err(|source| SyncError::Marker {
                node: attr.node,
                attribute: attr.name.clone(),
                source,
            })?;
            if !marker.belongs_to(&self.inner.name) {
                continue;
            }
            let role = roles
                .get(role_name)
                .ok_or_else(|| ConfigurationError::UnknownRole {
                    role: role_name.to_owned(),
                    attribute: attr.name.clone(),
                    node: attr.node,
                })?;
            found.push((attr.node, role.clone(), marker.property));
        }
        Ok(found)
    }

    /// Whether a raw marker value is in this model's namespace.
    ///
    /// The namespace is the text before the first `[`, so `username[...]`
    /// is never mistaken for `user`. A value with no `[` at all is claimed
    /// when it starts with the model name, so `sync` can report it.
    fn owns_marker(&self, raw: &str) -> bool {
        match raw.split_once('[') {
            Some((model, _)) => model == self.inner.name,
            None => raw.starts_with(self.inner.name.as_str()),
        }
    }

    fn bind(&self, node: NodeId, role: Role, property: String) {
        let inner = &self.inner;
        let kind = inner.tree.control_kind(node);
        let binding = Binding::new(
            node,
            role.name(),
            property,
            Marshaller::new(kind, &inner.config),
        );
        tracing::trace!(
            model = %inner.name,
            node = %node,
            role = binding.role(),
            property = binding.property(),
            ?kind,
            "bound"
        );

        if role.is_interactive() {
            let weak = Rc::downgrade(inner);
            let edited = binding.clone();
            let listener: Listener = Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    Model { inner }.user_edit(&role, &edited);
                }
            });
            let id = inner
                .tree
                .listen(node, Notification::for_control(kind), listener);
            inner.listeners.borrow_mut().hold(node, id);
        }

        inner.bindings.borrow_mut().insert(binding);
    }

    fn user_edit(&self, role: &Role, binding: &Binding) {
        let Some(value) = role.detect_change(&*self.inner.tree, binding) else {
            return;
        };
        tracing::trace!(
            model = %self.inner.name,
            property = binding.property(),
            "user edit"
        );
        self.set([(binding.property(), value)]);
    }

    /// Detach every listener this model attached and forget all bindings.
    ///
    /// Stored values and event handlers are kept; a later `sync` rebinds.
    pub fn unbind(&self) {
        self.inner.listeners.borrow_mut().clear();
        self.inner.bindings.borrow_mut().clear();
        tracing::debug!(model = %self.inner.name, "unbound");
    }

    // --- data ------------------------------------------------------------

    /// The stored value of `property`; `None` if it was never stored.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<Value> {
        self.inner.store.borrow().get(property).cloned()
    }

    /// Store each pair, push it to every binding of its property, and
    /// trigger `"<model>.set.<property>"` with the new value.
    ///
    /// ```
    /// use std::rc::Rc;
    /// use mog_dom::MemoryTree;
    /// use mog_runtime::Model;
    ///
    /// let model = Model::new("user", Rc::new(MemoryTree::new()));
    /// model.set([("email", "a@b.com")]);
    /// assert_eq!(model.get("email").unwrap(), "a@b.com");
    /// ```
    pub fn set<I, K, V>(&self, properties: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.apply(properties, true);
    }

    /// Like [`Model::set`] but without triggering events.
    pub fn set_suppressed<I, K, V>(&self, properties: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.apply(properties, false);
    }

    fn apply<I, K, V>(&self, properties: I, emit: bool)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in properties {
            let key: String = key.into();
            let value: Value = value.into();
            tracing::trace!(model = %self.inner.name, property = %key, ?value, emit, "set");

            self.inner
                .store
                .borrow_mut()
                .set_raw(key.clone(), value.clone());
            self.push_property(&key);
            if emit {
                self.trigger(&self.set_event_name(&key), Some(&value));
            }
        }
    }

    /// Recompute stored values from element state, last one wins.
    ///
    /// Only properties with at least one interactive binding are touched.
    /// Never triggers events.
    pub fn pull(&self) {
        let groups = {
            let roles = self.inner.roles.borrow();
            self.inner
                .bindings
                .borrow()
                .grouped_by_property(|role| roles.is_interactive(role))
        };

        for (property, bindings) in groups {
            let value = resolve_last_wins(&*self.inner.tree, &bindings);
            tracing::trace!(model = %self.inner.name, property = %property, ?value, "pull");
            self.inner.store.borrow_mut().set_raw(&*property, value);
        }
    }

    /// Write stored values out to bound elements.
    ///
    /// With `Some(property)`, only that property's bindings; with `None`,
    /// every bound property. Properties with nothing stored are skipped.
    pub fn push(&self, property: Option<&str>) {
        match property {
            Some(property) => self.push_property(property),
            None => {
                let properties = self.inner.bindings.borrow().properties();
                for property in properties {
                    self.push_property(&property);
                }
            }
        }
    }

    fn push_property(&self, property: &str) {
        let Some(value) = self.get(property) else {
            return;
        };
        let bindings = self.inner.bindings.borrow().for_property(property);
        if bindings.is_empty() {
            return;
        }
        let roles = Rc::clone(&self.inner.roles.borrow());

        tracing::trace!(
            model = %self.inner.name,
            property,
            bindings = bindings.len(),
            "push"
        );
        for binding in &bindings {
            if let Some(role) = roles.get(binding.role()) {
                role.disseminate(&*self.inner.tree, binding, &value);
            }
        }
    }

    // --- events ----------------------------------------------------------

    /// Register `handler` under each name in the comma-separated `events`.
    ///
    /// Handlers run last-registered-first and receive this model as context.
    pub fn on(
        &self,
        events: &str,
        handler: impl Fn(&Model, Option<&Value>) -> HandlerResult + 'static,
    ) -> &Self {
        self.inner.pipeline.borrow_mut().on(events, Rc::new(handler));
        self
    }

    /// Run every handler registered under `event`.
    pub fn trigger(&self, event: &str, value: Option<&Value>) -> Dispatch {
        let handlers = self.inner.pipeline.borrow().snapshot(event);
        pipeline::dispatch(&handlers, self, event, value)
    }

    /// Event name fired by `set` for `property`: `"<model>.set.<property>"`.
    #[must_use]
    pub fn set_event_name(&self, property: &str) -> String {
        format!("{}.set.{}", self.inner.name, property)
    }

    /// Whether anything is registered under `event`.
    #[must_use]
    pub fn has_listeners(&self, event: &str) -> bool {
        self.inner.pipeline.borrow().handler_count(event) > 0
    }

    // --- introspection ---------------------------------------------------

    /// Stored property keys, sorted.
    #[must_use]
    pub fn properties(&self) -> Vec<String> {
        self.inner.store.borrow().keys()
    }

    /// Stored `(key, value)` pairs, sorted by key.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(String, Value)> {
        self.inner.store.borrow().snapshot()
    }

    /// Number of elements bound to `property` through `role`.
    #[must_use]
    pub fn binding_count(&self, role: &str, property: &str) -> usize {
        self.inner.bindings.borrow().get(role, property).len()
    }

    /// Total number of bindings.
    #[must_use]
    pub fn bound_len(&self) -> usize {
        self.inner.bindings.borrow().len()
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.inner.name)
            .field("properties", &self.inner.store.borrow().len())
            .field("bindings", &self.inner.bindings.borrow().len())
            .finish()
    }
}
