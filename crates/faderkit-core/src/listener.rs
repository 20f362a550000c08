//! Observers for proposed control values.
//!
//! A [`ControlListener`] receives the gesture protocol of one control:
//! `begin_edit` when a drag (or one-shot reset) starts, `changed` for every
//! proposed value, and `end_edit` when it finishes. Hosts that record
//! automation or group undo steps care about the begin/end brackets; hosts
//! that only mirror values can pass a closure.
//!
//! [`ListenerSet`] holds any number of listeners. [`subscribe`] returns a
//! [`Subscription`] token that must be handed back to [`unsubscribe`] to stop
//! delivery; an empty set is a no-op.
//!
//! [`subscribe`]: ListenerSet::subscribe
//! [`unsubscribe`]: ListenerSet::unsubscribe
//!
//! # Example
//!
//! ```rust
//! use faderkit_core::{ListenerSet, Update};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let seen = Rc::new(Cell::new(0.0f32));
//! let sink = seen.clone();
//!
//! let mut listeners = ListenerSet::new();
//! let sub = listeners.subscribe(move |v: &f32| sink.set(*v));
//!
//! listeners.dispatch(&Update::changed(0.25));
//! assert_eq!(seen.get(), 0.25);
//!
//! assert!(listeners.unsubscribe(sub));
//! listeners.dispatch(&Update::changed(0.75));
//! assert_eq!(seen.get(), 0.25);
//! ```

use crate::gesture::Update;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

/// Token source shared by every set, so a token names exactly one listener.
static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// Receives proposed values from a control.
pub trait ControlListener<T: ?Sized> {
    /// An edit gesture started.
    fn begin_edit(&mut self) {}

    /// A new value was proposed.
    fn changed(&mut self, value: &T);

    /// The edit gesture finished.
    fn end_edit(&mut self) {}
}

impl<T: ?Sized, F: FnMut(&T)> ControlListener<T> for F {
    fn changed(&mut self, value: &T) {
        self(value);
    }
}

/// Token returned by [`ListenerSet::subscribe`].
///
/// Not `Clone`: a subscription is released exactly once.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "dropping a Subscription makes the listener impossible to remove"]
pub struct Subscription(u64);

impl Subscription {
    /// Raw token value, for diagnostics.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// An ordered collection of listeners for one value type.
pub struct ListenerSet<T: ?Sized> {
    entries: Vec<(u64, Box<dyn ControlListener<T>>)>,
}

impl<T: ?Sized> Default for ListenerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> core::fmt::Debug for ListenerSet<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl<T: ?Sized> ListenerSet<T> {
    /// An empty set.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a listener. Listeners are notified in subscription order.
    pub fn subscribe(&mut self, listener: impl ControlListener<T> + 'static) -> Subscription {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed) as u64;
        self.entries.push((id, Box::new(listener)));
        Subscription(id)
    }

    /// Remove a listener. Returns `false` if the token belongs to another set
    /// or was already removed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(id, _)| *id != subscription.0);
        self.entries.len() != before
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Notify every listener that an edit started.
    pub fn begin_edit(&mut self) {
        for (_, l) in &mut self.entries {
            l.begin_edit();
        }
    }

    /// Notify every listener of a proposed value.
    pub fn changed(&mut self, value: &T) {
        for (_, l) in &mut self.entries {
            l.changed(value);
        }
    }

    /// Notify every listener that an edit finished.
    pub fn end_edit(&mut self) {
        for (_, l) in &mut self.entries {
            l.end_edit();
        }
    }
}

impl<T> ListenerSet<T> {
    /// Deliver an [`Update`] in protocol order: begin, value, end.
    pub fn dispatch(&mut self, update: &Update<T>) {
        if update.began {
            self.begin_edit();
        }
        if let Some(v) = &update.value {
            self.changed(v);
        }
        if update.ended {
            self.end_edit();
        }
    }
}
