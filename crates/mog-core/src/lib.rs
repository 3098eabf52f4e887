#![forbid(unsafe_code)]

//! Leaf types for the mog binding engine.
//!
//! - [`Value`]: what a bound property holds (text or null).
//! - [`Marker`]: the parsed form of a `model[property]` attribute value.
//! - [`ControlKind`]: the closed set of control shapes a value can be
//!   marshalled through.
//! - [`HostTree`]: the capabilities the engine needs from a markup tree.
//!
//! Nothing in this crate mutates anything on its own; the engine lives in
//! `mog-runtime` and the in-memory tree in `mog-dom`.

pub mod control;
pub mod marker;
pub mod tree;
pub mod value;

pub use control::ControlKind;
pub use marker::{Marker, MarkerParseError, MarkerParseReason};
pub use tree::{HostTree, Listener, ListenerId, MarkedAttribute, NodeId, Notification};
pub use value::Value;
