// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Cascaded
//! changes are indented by their depth.

use std::io::Write;

use strata_core::trace::{
    AttachEvent, PropagationEvent, SuppressedEvent, TraceSink, VisibilityChangeEvent,
};

use crate::propagation_label;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn on_off(visible: bool) -> &'static str {
    if visible { "on" } else { "off" }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_visibility_change(&mut self, e: &VisibilityChangeEvent) {
        let indent = "  ".repeat(e.depth as usize);
        let _ = writeln!(
            self.writer,
            "{indent}[visible] {}={} flags={}",
            e.key,
            on_off(e.visible),
            propagation_label(e.propagation),
        );
    }

    fn on_propagation(&mut self, e: &PropagationEvent) {
        let _ = writeln!(
            self.writer,
            "[{}] {} -> {} {}",
            e.direction.as_str(),
            e.from,
            e.to,
            on_off(e.visible),
        );
    }

    fn on_suppressed(&mut self, e: &SuppressedEvent) {
        let _ = writeln!(
            self.writer,
            "[suppressed] {} {}",
            e.key,
            e.direction.as_str(),
        );
    }

    fn on_attach(&mut self, e: &AttachEvent) {
        let _ = writeln!(
            self.writer,
            "[attach] {} surface={} renderable={}",
            e.key, e.surface.0, e.registered,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::event::Propagation;
    use strata_core::layer::LayerKey;
    use strata_core::trace::Direction;

    #[test]
    fn pretty_print_change() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_visibility_change(&VisibilityChangeEvent {
            key: LayerKey::new("osm"),
            visible: false,
            propagation: Propagation::ALL.without_down(),
            depth: 1,
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert_eq!(output, "  [visible] osm=off flags=-down\n");
    }

    #[test]
    fn pretty_print_propagation_and_suppression() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_propagation(&PropagationEvent {
            from: LayerKey::new("basemaps"),
            to: LayerKey::new("osm"),
            direction: Direction::Down,
            visible: true,
        });
        sink.on_suppressed(&SuppressedEvent {
            key: LayerKey::new("osm"),
            direction: Direction::Sibling,
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines, ["[down] basemaps -> osm on", "[suppressed] osm sibling"]);
    }
}
