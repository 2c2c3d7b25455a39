// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export of recorded events.
//!
//! [`export`] writes the events held by a
//! [`RecorderSink`](super::recorder::RecorderSink) as a pretty-printed JSON
//! array, one object per event in arrival order. Every object has a `name`
//! and a `key` field; the remaining fields depend on the event.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::propagation_label;
use crate::recorder::RecordedEvent;

/// Exports recorded events as a JSON array.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let values: Vec<Value> = events.iter().map(to_value).collect();
    serde_json::to_writer_pretty(writer, &values)?;
    Ok(())
}

fn to_value(recorded: &RecordedEvent) -> Value {
    let name = recorded.name();
    match recorded {
        RecordedEvent::VisibilityChange(e) => json!({
            "name": name,
            "key": e.key.as_str(),
            "visible": e.visible,
            "depth": e.depth,
            "propagation": propagation_label(e.propagation),
        }),
        RecordedEvent::Propagation(e) => json!({
            "name": name,
            "key": e.from.as_str(),
            "to": e.to.as_str(),
            "direction": e.direction.as_str(),
            "visible": e.visible,
        }),
        RecordedEvent::Suppressed(e) => json!({
            "name": name,
            "key": e.key.as_str(),
            "direction": e.direction.as_str(),
        }),
        RecordedEvent::Attach(e) => json!({
            "name": name,
            "key": e.key.as_str(),
            "surface": e.surface.0,
            "registered": e.registered,
        }),
    }
}
