#![forbid(unsafe_code)]

//! In-memory markup tree for the mog binding engine.
//!
//! [`MemoryTree`] implements [`mog_core::HostTree`] without a browser. It
//! keeps a flat list of [`Element`]s in document order and lets the host
//! simulate user interaction ([`MemoryTree::type_text`],
//! [`MemoryTree::toggle`], [`MemoryTree::check`], [`MemoryTree::choose`]),
//! which is the only way notifications are delivered.
//!
//! # Example
//!
//! ```
//! use mog_dom::{Element, MemoryTree};
//!
//! let tree = MemoryTree::new();
//! let email = tree.append(Element::text_input().attr("data-mog-input", "user[email]"));
//! tree.type_text(email, "c@d.com");
//! assert_eq!(tree.value_of(email), "c@d.com");
//! ```

pub mod element;
pub mod tree;

pub use element::{Element, OptionElement};
pub use tree::MemoryTree;
