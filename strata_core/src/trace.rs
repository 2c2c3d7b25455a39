// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for visibility propagation.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`LayerTree`](crate::tree::LayerTree) calls while it cascades a change. All
//! method bodies default to no-ops, so implementing only the events you care
//! about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.

use crate::event::Propagation;
use crate::layer::LayerKey;
use crate::render::SurfaceId;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Direction in which a visibility change travels through the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From a node to its children.
    Down,
    /// From a node to its parent.
    Up,
    /// From a node to the other members of its radio group.
    Sibling,
}

impl Direction {
    /// Returns a short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Up => "up",
            Self::Sibling => "sibling",
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a node's visibility actually changed during a cascade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityChangeEvent {
    /// The node that changed.
    pub key: LayerKey,
    /// Its new visibility.
    pub visible: bool,
    /// Flags the change was applied with.
    pub propagation: Propagation,
    /// Cascade depth; 0 is the node the caller addressed.
    pub depth: u32,
}

/// Emitted before the tree forwards a change to a related node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropagationEvent {
    /// The node whose change is being forwarded.
    pub from: LayerKey,
    /// The node receiving the forwarded change.
    pub to: LayerKey,
    /// Relationship between the two nodes.
    pub direction: Direction,
    /// Visibility requested on `to`.
    pub visible: bool,
}

/// Emitted when a suppression flag stops propagation in one direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuppressedEvent {
    /// The node whose change was not forwarded.
    pub key: LayerKey,
    /// The suppressed direction.
    pub direction: Direction,
}

/// Emitted when a node is attached to a surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachEvent {
    /// The attached node.
    pub key: LayerKey,
    /// The surface it was bound to.
    pub surface: SurfaceId,
    /// Whether a renderable was registered on the surface.
    pub registered: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the layer tree.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a node changed visibility.
    fn on_visibility_change(&mut self, e: &VisibilityChangeEvent) {
        _ = e;
    }

    /// Called before a change is forwarded to a related node.
    fn on_propagation(&mut self, e: &PropagationEvent) {
        _ = e;
    }

    /// Called when a flag suppressed a direction.
    fn on_suppressed(&mut self, e: &SuppressedEvent) {
        _ = e;
    }

    /// Called when a node is attached to a surface.
    fn on_attach(&mut self, e: &AttachEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`VisibilityChangeEvent`].
    #[inline]
    pub fn visibility_change(&mut self, e: &VisibilityChangeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_visibility_change(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PropagationEvent`].
    #[inline]
    pub fn propagation(&mut self, e: &PropagationEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_propagation(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SuppressedEvent`].
    #[inline]
    pub fn suppressed(&mut self, e: &SuppressedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_suppressed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`AttachEvent`].
    #[inline]
    pub fn attach(&mut self, e: &AttachEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_attach(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Returns whether events reach a sink.
    ///
    /// Lets callers skip building events nobody will see.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_change() -> VisibilityChangeEvent {
        VisibilityChangeEvent {
            key: LayerKey::new("osm"),
            visible: false,
            propagation: Propagation::ALL,
            depth: 0,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_visibility_change(&sample_change());
        sink.on_suppressed(&SuppressedEvent {
            key: LayerKey::new("osm"),
            direction: Direction::Up,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        assert!(!tracer.is_active());
        tracer.visibility_change(&sample_change());
    }

    #[test]
    fn direction_labels() {
        assert_eq!(Direction::Down.as_str(), "down");
        assert_eq!(Direction::Up.as_str(), "up");
        assert_eq!(Direction::Sibling.as_str(), "sibling");
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            keys: Vec<LayerKey>,
        }
        impl TraceSink for RecordingSink {
            fn on_visibility_change(&mut self, e: &VisibilityChangeEvent) {
                self.keys.push(e.key.clone());
            }
        }

        let mut sink = RecordingSink { keys: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        assert!(tracer.is_active());
        tracer.visibility_change(&sample_change());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.keys, [LayerKey::new("osm")]);
    }
}
