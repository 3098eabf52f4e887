#![forbid(unsafe_code)]

//! Roles: how a binding moves data in and out of its element.
//!
//! A [`Role`] is assembled from capability functions rather than inherited:
//! every role supplies `disseminate` (store → element); interactive roles
//! also supply a change-detection hook (element → value) that the engine
//! forwards into [`Model::set`](crate::Model::set).
//!
//! Built-in roles:
//!
//! | Role | Disseminate | Change detection |
//! |------|-------------|------------------|
//! | `input` | marshaller write (focus-guarded for text) | marshaller read, on `change` or `keyup` |
//! | `output` | replace text content | none |
//! | `button` | none | none |
//!
//! New roles are added with [`Role::new`] and
//! [`Model::register_role`](crate::Model::register_role); existing roles are
//! never touched.
//!
//! # Example
//!
//! ```
//! use mog_runtime::Role;
//!
//! // Mirror the value into a `title` tooltip, never read back.
//! let tooltip = Role::new("tooltip", |tree, binding, value| {
//!     tree.set_text_content(binding.node(), &format!("[{value}]"));
//! });
//! assert!(!tooltip.is_interactive());
//! ```

use std::fmt;
use std::rc::Rc;

use mog_core::{HostTree, Value};

use crate::binding::Binding;

/// Name of the built-in bidirectional role.
pub const INPUT: &str = "input";
/// Name of the built-in write-only role.
pub const OUTPUT: &str = "output";
/// Name of the built-in inert role.
pub const BUTTON: &str = "button";

type Disseminate = Rc<dyn Fn(&dyn HostTree, &Binding, &Value)>;
type DetectChange = Rc<dyn Fn(&dyn HostTree, &Binding) -> Option<Value>>;

/// A named capability set for bindings.
#[derive(Clone)]
pub struct Role {
    name: Rc<str>,
    disseminate: Disseminate,
    detect_change: Option<DetectChange>,
}

impl Role {
    /// A write-only role from its `disseminate` function.
    pub fn new(
        name: impl Into<Rc<str>>,
        disseminate: impl Fn(&dyn HostTree, &Binding, &Value) + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            disseminate: Rc::new(disseminate),
            detect_change: None,
        }
    }

    /// Make the role interactive.
    ///
    /// `detect` computes the element's new value after a user edit; `None`
    /// means the edit does not change the property.
    #[must_use]
    pub fn with_change_detection(
        mut self,
        detect: impl Fn(&dyn HostTree, &Binding) -> Option<Value> + 'static,
    ) -> Self {
        self.detect_change = Some(Rc::new(detect));
        self
    }

    /// Bidirectional form-control role.
    #[must_use]
    pub fn input() -> Self {
        Self::new(INPUT, |tree, binding, value| {
            binding.marshaller().write(tree, binding.node(), value);
        })
        .with_change_detection(|tree, binding| binding.marshaller().read(tree, binding.node()))
    }

    /// Write-only display role.
    #[must_use]
    pub fn output() -> Self {
        Self::new(OUTPUT, |tree, binding, value| {
            tree.set_text_content(binding.node(), value.display_text());
        })
    }

    /// Inert role; a placeholder for action bindings.
    #[must_use]
    pub fn button() -> Self {
        Self::new(BUTTON, |_, _, _| {})
    }

    /// The role's name, the suffix of its marker attribute.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the role listens for user edits.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.detect_change.is_some()
    }

    /// Write `value` into the binding's element.
    pub fn disseminate(&self, tree: &dyn HostTree, binding: &Binding, value: &Value) {
        (self.disseminate)(tree, binding, value);
    }

    /// The element's new value after a user edit, if the role is interactive.
    #[must_use]
    pub fn detect_change(&self, tree: &dyn HostTree, binding: &Binding) -> Option<Value> {
        self.detect_change
            .as_ref()
            .and_then(|detect| detect(tree, binding))
    }
}

impl fmt::Debug for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Role")
            .field("name", &self.name)
            .field("interactive", &self.is_interactive())
            .finish()
    }
}

/// The roles a model recognises, in registration order.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    roles: Vec<Role>,
}

impl Default for RoleRegistry {
    /// `input`, `output`, and `button`.
    fn default() -> Self {
        Self {
            roles: vec![Role::input(), Role::output(), Role::button()],
        }
    }
}

impl RoleRegistry {
    /// A registry with no roles at all.
    #[must_use]
    pub fn empty() -> Self {
        Self { roles: Vec::new() }
    }

    /// Add a role.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::DuplicateRole`](crate::ConfigurationError::DuplicateRole)
    /// if a role with the same name exists.
    pub fn register(&mut self, role: Role) -> Result<(), crate::ConfigurationError> {
        if self.get(role.name()).is_some() {
            return Err(crate::ConfigurationError::DuplicateRole {
                role: role.name().to_owned(),
            });
        }
        self.roles.push(role);
        Ok(())
    }

    /// Look up a role by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.name() == name)
    }

    /// Whether the named role exists and is interactive.
    #[must_use]
    pub fn is_interactive(&self, name: &str) -> bool {
        self.get(name).is_some_and(Role::is_interactive)
    }

    /// Names of every registered role.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(Role::name)
    }
}
