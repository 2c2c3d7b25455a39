// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps a clone of every event
//! it receives, in arrival order, as a [`RecordedEvent`]. Layer keys are
//! strings, so events are stored owned rather than encoded.

use strata_core::layer::LayerKey;
use strata_core::trace::{
    AttachEvent, Direction, PropagationEvent, SuppressedEvent, TraceSink, VisibilityChangeEvent,
};

// ---------------------------------------------------------------------------
// RecordedEvent
// ---------------------------------------------------------------------------

/// A recorded trace event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// See [`TraceSink::on_visibility_change`].
    VisibilityChange(VisibilityChangeEvent),
    /// See [`TraceSink::on_propagation`].
    Propagation(PropagationEvent),
    /// See [`TraceSink::on_suppressed`].
    Suppressed(SuppressedEvent),
    /// See [`TraceSink::on_attach`].
    Attach(AttachEvent),
}

impl RecordedEvent {
    /// Returns the event's name as used in exports.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::VisibilityChange(_) => "VisibilityChange",
            Self::Propagation(_) => "Propagation",
            Self::Suppressed(_) => "Suppressed",
            Self::Attach(_) => "Attach",
        }
    }
}

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that records every event in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events in arrival order.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Discards all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Returns the keys of nodes that changed, in order of change.
    pub fn changed_keys(&self) -> impl Iterator<Item = &LayerKey> {
        self.events.iter().filter_map(|e| match e {
            RecordedEvent::VisibilityChange(c) => Some(&c.key),
            _ => None,
        })
    }

    /// Returns the directions that were suppressed for `key`.
    pub fn suppressed_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = Direction> + 'a {
        self.events.iter().filter_map(move |e| match e {
            RecordedEvent::Suppressed(s) if s.key == key => Some(s.direction),
            _ => None,
        })
    }
}

impl TraceSink for RecorderSink {
    fn on_visibility_change(&mut self, e: &VisibilityChangeEvent) {
        self.events.push(RecordedEvent::VisibilityChange(e.clone()));
    }

    fn on_propagation(&mut self, e: &PropagationEvent) {
        self.events.push(RecordedEvent::Propagation(e.clone()));
    }

    fn on_suppressed(&mut self, e: &SuppressedEvent) {
        self.events.push(RecordedEvent::Suppressed(e.clone()));
    }

    fn on_attach(&mut self, e: &AttachEvent) {
        self.events.push(RecordedEvent::Attach(e.clone()));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
