// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change events and the publish/subscribe capability layers expose.
//!
//! Every [`LayerNode`](crate::layer::LayerNode) owns an [`Observable`].
//! Listeners register for an [`EventKind`] and are invoked synchronously, in
//! registration order, before the mutating call returns. There is no queue
//! and no batching.
//!
//! # Propagation flags
//!
//! A visibility change carries a [`Propagation`] value with one suppression
//! flag per direction. The node never walks the tree itself; the flags are
//! routing instructions for whoever reacts to the event (usually
//! [`LayerTree`](crate::tree::LayerTree)), and they are forwarded verbatim in
//! the emitted [`VisibilityEvent`].

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::layer::LayerKey;

/// Names the kinds of events a layer emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The layer's visibility changed.
    ChangeVisible,
}

impl EventKind {
    /// Returns the wire name of this event kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChangeVisible => "change:visible",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call routing instructions for a visibility change.
///
/// All flags default to `false`, meaning the change may cascade in every
/// direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Propagation {
    /// Do not cascade the change to the node's children.
    pub suppress_down: bool,
    /// Do not recompute the parent's aggregate visibility.
    pub suppress_up: bool,
    /// Do not deselect other members of the node's radio group.
    pub suppress_siblings: bool,
}

impl Propagation {
    /// Cascade in every direction.
    pub const ALL: Self = Self {
        suppress_down: false,
        suppress_up: false,
        suppress_siblings: false,
    };

    /// Change the node only.
    pub const NONE: Self = Self {
        suppress_down: true,
        suppress_up: true,
        suppress_siblings: true,
    };

    /// Returns a copy with downward propagation suppressed.
    #[must_use]
    pub const fn without_down(mut self) -> Self {
        self.suppress_down = true;
        self
    }

    /// Returns a copy with upward propagation suppressed.
    #[must_use]
    pub const fn without_up(mut self) -> Self {
        self.suppress_up = true;
        self
    }

    /// Returns a copy with sibling propagation suppressed.
    #[must_use]
    pub const fn without_siblings(mut self) -> Self {
        self.suppress_siblings = true;
        self
    }
}

/// Payload of a [`EventKind::ChangeVisible`] event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityEvent {
    /// Key of the node whose visibility changed.
    pub source: LayerKey,
    /// The node's new visibility.
    pub visible: bool,
    /// Routing flags supplied by the caller, unmodified.
    pub propagation: Propagation,
}

/// An event emitted by a layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayerEvent {
    /// See [`EventKind::ChangeVisible`].
    ChangeVisible(VisibilityEvent),
}

impl LayerEvent {
    /// Returns the kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::ChangeVisible(_) => EventKind::ChangeVisible,
        }
    }
}

/// Handle returned by [`Observable::on`], used to unregister the listener.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerKey(u32);

impl fmt::Debug for ListenerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListenerKey({})", self.0)
    }
}

type Listener = Box<dyn FnMut(&LayerEvent)>;

/// A list of listeners keyed by event kind.
#[derive(Default)]
pub struct Observable {
    listeners: Vec<(ListenerKey, EventKind, Listener)>,
    next_key: u32,
}

impl fmt::Debug for Observable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("listeners", &self.listeners.len())
            .field("next_key", &self.next_key)
            .finish()
    }
}

impl Observable {
    /// Creates an observable with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for events of `kind`.
    pub fn on(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&LayerEvent) + 'static,
    ) -> ListenerKey {
        let key = ListenerKey(self.next_key);
        self.next_key = self.next_key.wrapping_add(1);
        self.listeners.push((key, kind, Box::new(listener)));
        key
    }

    /// Unregisters a listener. Returns whether it was registered.
    pub fn un(&mut self, key: ListenerKey) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(k, _, _)| *k != key);
        self.listeners.len() != before
    }

    /// Invokes every listener registered for the event's kind.
    pub fn dispatch(&mut self, event: &LayerEvent) {
        let kind = event.kind();
        for (_, listening, listener) in &mut self.listeners {
            if *listening == kind {
                listener(event);
            }
        }
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns whether no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use super::*;

    fn change(visible: bool) -> LayerEvent {
        LayerEvent::ChangeVisible(VisibilityEvent {
            source: LayerKey::new("osm"),
            visible,
            propagation: Propagation::ALL,
        })
    }

    #[test]
    fn event_kind_wire_name() {
        assert_eq!(EventKind::ChangeVisible.as_str(), "change:visible");
        assert_eq!(change(true).kind(), EventKind::ChangeVisible);
    }

    #[test]
    fn dispatch_runs_listeners_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observable = Observable::new();
        let first = Rc::clone(&log);
        observable.on(EventKind::ChangeVisible, move |_| first.borrow_mut().push(1));
        let second = Rc::clone(&log);
        observable.on(EventKind::ChangeVisible, move |_| second.borrow_mut().push(2));

        observable.dispatch(&change(false));
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn un_removes_only_that_listener() {
        let hits = Rc::new(RefCell::new(0_u32));
        let mut observable = Observable::new();
        let h = Rc::clone(&hits);
        let removed = observable.on(EventKind::ChangeVisible, move |_| *h.borrow_mut() += 10);
        let h = Rc::clone(&hits);
        observable.on(EventKind::ChangeVisible, move |_| *h.borrow_mut() += 1);

        assert!(observable.un(removed));
        assert!(!observable.un(removed), "second removal is a no-op");
        observable.dispatch(&change(true));
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(observable.len(), 1);
    }

    #[test]
    fn listener_keys_wrap_instead_of_overflowing() {
        let mut observable = Observable {
            next_key: u32::MAX,
            ..Observable::default()
        };
        let last = observable.on(EventKind::ChangeVisible, |_| {});
        let wrapped = observable.on(EventKind::ChangeVisible, |_| {});
        assert_eq!(last, ListenerKey(u32::MAX));
        assert_eq!(wrapped, ListenerKey(0));
        assert!(observable.un(wrapped));
        assert_eq!(observable.len(), 1);
    }

    #[test]
    fn propagation_builders() {
        assert_eq!(Propagation::default(), Propagation::ALL);
        let p = Propagation::ALL.without_down().without_siblings();
        assert!(p.suppress_down && p.suppress_siblings && !p.suppress_up);
        assert_eq!(
            Propagation::ALL.without_down().without_up().without_siblings(),
            Propagation::NONE
        );
    }
}
