// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer tree, visibility propagation, and change events for map overlays.
//!
//! `strata_core` models the state of a hierarchical collection of map layers:
//! which layers exist, how they nest, which are visible, and which belong to
//! a mutually exclusive *radio group* (base maps being the classic example).
//! It is `no_std` compatible (with `alloc`) and knows nothing about drawing;
//! the rendering engine is reached through the [`Renderable`](render::Renderable)
//! and [`LayerSurface`](render::LayerSurface) contracts.
//!
//! # Architecture
//!
//! A visibility change flows from a caller through a node and out to whoever
//! is listening:
//!
//! ```text
//!   caller (UI action, another layer)
//!       │
//!       ▼
//!   LayerTree::set_visible(key, visible, Propagation)
//!       │
//!       ▼
//!   LayerNode::set_visible ──► Renderable::set_visible
//!       │
//!       ▼
//!   VisibilityEvent ──► node listeners (UI observers)
//!       │
//!       └──► LayerTree reacts: Down (children), Sibling (radio group), Up (parent)
//!                 │
//!                 └──► LayerNode::set_visible on related nodes (flags forwarded)
//! ```
//!
//! **[`layer`]**: [`LayerNode`](layer::LayerNode) with identity, flags, children,
//! and the guarded `set_visible` that emits change events. Specialized node
//! behavior (click handling, feature lookup) plugs in via
//! [`LayerKind`](layer::LayerKind).
//!
//! **[`event`]**: Synchronous publish/subscribe capability and the
//! [`Propagation`](event::Propagation) flags that route each change.
//!
//! **[`tree`]**: [`LayerTree`](tree::LayerTree), the coordinator that reacts to
//! change events by cascading to children, enforcing radio-group exclusivity,
//! and aggregating visibility into parents.
//!
//! **[`render`]**: Contracts for the externally owned drawable handle and the
//! surface it is registered on.
//!
//! **[`permalink`]**: State behind a permalink field: raw value, optionally
//! shortened display value, and the copy action.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! propagation instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod error;
pub mod event;
pub mod layer;
pub mod permalink;
pub mod render;
pub mod trace;
pub mod tree;

pub use error::LayerError;
