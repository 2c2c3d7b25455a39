// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer tree data model.
//!
//! A *layer* is a node in a map overlay tree. Each layer has:
//!
//! - An identity ([`LayerKey`]), stable and unique within a tree; derived
//!   from the lower-cased name when not supplied.
//! - **Flags** set at construction: base-layer candidate, legend hint, and an
//!   optional radio-group tag.
//! - **Visibility**, mutated only through [`LayerNode::set_visible`], which
//!   keeps the attached [`Renderable`](crate::render::Renderable) in sync and
//!   emits a [`VisibilityEvent`](crate::event::VisibilityEvent).
//! - **Children**, an ordered, exclusively owned sequence. Insertion order is
//!   display order; [`add_child`](LayerNode::add_child) puts the newest child
//!   first.
//! - A [`LayerKind`] supplying click handling and feature lookup.
//!
//! # Radio groups
//!
//! Nodes sharing a non-empty [`radio_group`](LayerNode::radio_group) are
//! mutually exclusive. A node without an explicit group that is a base layer
//! falls back to [`BASE_LAYER_GROUP`]. The node only reports the tag;
//! exclusivity is applied by [`LayerTree`](crate::tree::LayerTree).

mod key;
mod kind;
mod node;
mod traverse;

pub use key::LayerKey;
pub use kind::{Feature, FeatureInfo, FeatureInfoFuture, LayerKind, PlainLayer, PointFeatures};
pub use node::{BASE_LAYER_GROUP, LayerNode, LayerOptions};
pub use traverse::{DepthFirst, VisibleChildren};
