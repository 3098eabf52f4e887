#![forbid(unsafe_code)]

//! mog: declarative two-way binding between named models and markup.
//!
//! This crate re-exports the engine ([`mog_runtime`]), its leaf types
//! ([`mog_core`]), and with the default `memory-tree` feature the in-memory
//! host ([`mog_dom`]). Most code only needs the [`prelude`].
//!
//! ```
//! # #[cfg(feature = "memory-tree")] {
//! use mog::prelude::*;
//! use std::rc::Rc;
//!
//! let tree = Rc::new(MemoryTree::new());
//! let agree = tree.append(Element::checkbox("yes").attr("data-mog-input", "form[agree]"));
//!
//! let form = Model::new("form", tree.clone());
//! form.sync().unwrap();
//! assert_eq!(form.get("agree"), Some(Value::Null));
//!
//! tree.toggle(agree);
//! assert_eq!(form.get("agree").unwrap(), "yes");
//! # }
//! ```

pub use mog_core;
#[cfg(feature = "memory-tree")]
pub use mog_dom;
pub use mog_runtime;

pub use mog_core::{ControlKind, HostTree, Marker, MarkerParseError, NodeId, Notification, Value};
pub use mog_runtime::{
    Binding, ConfigurationError, Dispatch, HandlerResult, Model, Role, SyncConfig, SyncError,
    SyncReport,
};

#[cfg(feature = "memory-tree")]
pub use mog_dom::{Element, MemoryTree, OptionElement};

/// Everything needed to declare and drive models.
pub mod prelude {
    pub use crate::{
        ConfigurationError, HandlerResult, HostTree, Model, Role, SyncConfig, SyncError, Value,
    };

    #[cfg(feature = "memory-tree")]
    pub use crate::{Element, MemoryTree, OptionElement};
}
