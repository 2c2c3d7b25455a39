// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON export for strata layer-tree
//! diagnostics.
//!
//! This crate provides [`TraceSink`](strata_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: keeps every event in memory as a
//!   [`recorder::RecordedEvent`].
//! - [`json::export`]: writes recorded events as a JSON array.

pub mod json;
pub mod pretty;
pub mod recorder;

use strata_core::event::Propagation;

/// Formats suppression flags as a compact label, e.g. `-down,-up`.
///
/// Returns `all` when nothing is suppressed.
pub(crate) fn propagation_label(p: Propagation) -> String {
    let mut parts = Vec::new();
    if p.suppress_down {
        parts.push("-down");
    }
    if p.suppress_up {
        parts.push("-up");
    }
    if p.suppress_siblings {
        parts.push("-siblings");
    }
    if parts.is_empty() {
        "all".into()
    } else {
        parts.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(propagation_label(Propagation::ALL), "all");
        assert_eq!(propagation_label(Propagation::NONE), "-down,-up,-siblings");
        assert_eq!(propagation_label(Propagation::ALL.without_up()), "-up");
    }
}
