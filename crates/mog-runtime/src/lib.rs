#![forbid(unsafe_code)]

//! Bidirectional data binding between a property store and a markup tree.
//!
//! A [`Model`] is a named namespace. Elements opt in with marker attributes
//! such as `data-mog-input="user[email]"`; [`Model::sync`] discovers them,
//! binds each through a [`Role`], and from then on:
//!
//! - [`Model::set`] stores a value, pushes it to every bound element, and
//!   triggers `"<model>.set.<property>"`;
//! - a user edit on an interactive element flows back through `set`;
//! - [`Model::pull`] and [`Model::push`] resynchronise in bulk.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use mog_dom::{Element, MemoryTree};
//! use mog_runtime::Model;
//!
//! let tree = Rc::new(MemoryTree::new());
//! let email = tree.append(Element::text_input().attr("data-mog-input", "user[email]"));
//! let shown = tree.append(Element::span().attr("data-mog-output", "user[email]"));
//!
//! let user = Model::new("user", tree.clone());
//! user.sync().unwrap();
//!
//! user.set([("email", "a@b.com")]);
//! assert_eq!(tree.value_of(email), "a@b.com");
//! assert_eq!(tree.text_of(shown), "a@b.com");
//!
//! tree.type_text(email, "c@d.com");
//! assert_eq!(user.get("email").unwrap(), "c@d.com");
//! assert_eq!(tree.text_of(shown), "c@d.com");
//! ```
//!
//! Everything is single-threaded: models are `Rc` handles and every call
//! completes synchronously before returning.

pub mod binding;
pub mod config;
pub mod error;
pub mod marshal;
pub mod model;
pub mod pipeline;
pub mod role;
pub mod scope;
pub mod store;

pub use binding::{Binding, BindingTable, resolve_last_wins};
pub use config::SyncConfig;
pub use error::{ConfigurationError, HandlerResult, SyncError};
pub use marshal::Marshaller;
pub use model::{Model, SyncReport};
pub use pipeline::{Dispatch, EventPipeline, Handler};
pub use role::{Role, RoleRegistry};
pub use scope::ListenerScope;
pub use store::PropertyStore;

pub use mog_core::{ControlKind, HostTree, Marker, NodeId, Value};
