#![forbid(unsafe_code)]

//! Named, multi-subscriber event pipeline.
//!
//! # Invariants
//!
//! 1. Registration is append-only; there is no unsubscribe.
//! 2. Dispatch runs handlers in **reverse** registration order: the most
//!    recently registered handler runs first.
//! 3. Each registration fires independently, so a handler registered twice
//!    under one name runs twice.
//! 4. Dispatch is synchronous and works on a snapshot: handlers registered
//!    while an event is being dispatched do not run for that dispatch.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Trigger with no handlers | No-op |
//! | Handler returns `Err` | Logged at `warn`, remaining handlers still run |
//! | Handler panics | Propagates to the caller of `trigger` |
//! | Handler re-triggers the same event | Recursion, unguarded |

use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;
use mog_core::Value;

use crate::error::HandlerResult;

/// A subscriber. `C` is the execution context handed to every call.
pub type Handler<C> = Rc<dyn Fn(&C, Option<&Value>) -> HandlerResult>;

/// Outcome of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatch {
    /// Handlers that ran.
    pub invoked: usize,
    /// Handlers that returned an error.
    pub failed: usize,
}

/// Event name → ordered handler list.
pub struct EventPipeline<C> {
    handlers: AHashMap<String, Vec<Handler<C>>>,
}

impl<C> Default for EventPipeline<C> {
    fn default() -> Self {
        Self {
            handlers: AHashMap::new(),
        }
    }
}

impl<C> fmt::Debug for EventPipeline<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut events: Vec<_> = self
            .handlers
            .iter()
            .map(|(name, list)| (name.as_str(), list.len()))
            .collect();
        events.sort_unstable();
        f.debug_struct("EventPipeline")
            .field("events", &events)
            .finish()
    }
}

/// Split a comma-separated event list into trimmed, non-empty names.
pub fn event_names(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|name| !name.is_empty())
}

impl<C> EventPipeline<C> {
    /// Create an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under every name in the comma-separated `events`.
    ///
    /// Returns `self` for chaining.
    pub fn on(&mut self, events: &str, handler: Handler<C>) -> &mut Self {
        for name in event_names(events) {
            self.handlers
                .entry(name.to_owned())
                .or_default()
                .push(Rc::clone(&handler));
        }
        self
    }

    /// Number of registrations under `event`.
    #[must_use]
    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers.get(event).map_or(0, Vec::len)
    }

    /// Copy of the handler list for `event`, in registration order.
    ///
    /// Callers that keep the pipeline behind a `RefCell` take a snapshot,
    /// release the borrow, then [`dispatch`] so handlers may re-enter.
    #[must_use]
    pub fn snapshot(&self, event: &str) -> Vec<Handler<C>> {
        self.handlers.get(event).cloned().unwrap_or_default()
    }

    /// Run every handler registered under `event`, last registered first.
    pub fn trigger(&self, ctx: &C, event: &str, value: Option<&Value>) -> Dispatch {
        dispatch(&self.snapshot(event), ctx, event, value)
    }
}

/// Run `handlers` in reverse order, isolating failures.
pub fn dispatch<C>(
    handlers: &[Handler<C>],
    ctx: &C,
    event: &str,
    value: Option<&Value>,
) -> Dispatch {
    let mut outcome = Dispatch::default();
    for handler in handlers.iter().rev() {
        outcome.invoked += 1;
        if let Err(err) = handler(ctx, value) {
            outcome.failed += 1;
            tracing::warn!(event, error = %err, "event handler failed");
        }
    }
    outcome
}
