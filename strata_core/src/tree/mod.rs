// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer tree coordinator.
//!
//! [`LayerTree`] owns a root [`LayerNode`] and everything below it. It is the
//! party that guarantees key uniqueness, resolves keys to nodes, and reacts to
//! the [`VisibilityEvent`](crate::event::VisibilityEvent)s nodes emit by
//! forwarding the change to related nodes (see [`LayerTree::set_visible`]).
//!
//! Nodes are addressed by key. Internally a node is located by its *path*,
//! the sequence of child indices from the root; the root's path is empty.
//! Radio-group membership is resolved by scanning for a shared tag, never by
//! nodes holding references to each other.

mod propagate;

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use kurbo::Point;

use crate::error::LayerError;
use crate::layer::{DepthFirst, FeatureInfo, LayerKey, LayerNode};
use crate::render::LayerSurface;
use crate::trace::{AttachEvent, Tracer};

/// A tree of layers with unique keys.
#[derive(Debug)]
pub struct LayerTree {
    root: LayerNode,
}

impl LayerTree {
    /// Creates a tree from a root layer and its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::DuplicateKey`] if two layers share a key.
    pub fn new(root: LayerNode) -> Result<Self, LayerError> {
        let mut seen = BTreeSet::new();
        for node in &root {
            if !seen.insert(node.key()) {
                return Err(LayerError::DuplicateKey(node.key().clone()));
            }
        }
        Ok(Self { root })
    }

    /// Returns the root layer.
    #[must_use]
    pub fn root(&self) -> &LayerNode {
        &self.root
    }

    /// Returns a depth-first pre-order iterator over all layers.
    #[must_use]
    pub fn iter(&self) -> DepthFirst<'_> {
        self.root.iter()
    }

    /// Returns whether a layer with this key exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the layer with this key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LayerNode> {
        self.iter().find(|node| node.key() == key)
    }

    /// Returns the layer with this key for calling its public methods.
    ///
    /// Changing a layer's children through this reference bypasses the
    /// tree's key-uniqueness check; use [`add_layer`](Self::add_layer) and
    /// [`remove_layer`](Self::remove_layer) instead.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut LayerNode> {
        let path = self.path_of(key)?;
        Some(self.node_at_mut(&path))
    }

    /// Returns the parent of the layer with this key.
    ///
    /// `None` for the root and for unknown keys.
    #[must_use]
    pub fn parent(&self, key: &str) -> Option<&LayerNode> {
        let path = self.path_of(key)?;
        let (_, parent) = path.split_last()?;
        Some(self.node_at(parent))
    }

    /// Returns every layer whose effective radio group is `group`, in
    /// traversal order.
    #[must_use]
    pub fn radio_group(&self, group: &str) -> Vec<&LayerNode> {
        self.iter()
            .filter(|node| node.radio_group() == Some(group))
            .collect()
    }

    /// Returns the layers that are visible along with all their ancestors,
    /// in traversal order.
    #[must_use]
    pub fn visible_layers(&self) -> Vec<&LayerNode> {
        fn collect<'a>(node: &'a LayerNode, out: &mut Vec<&'a LayerNode>) {
            if !node.visible() {
                return;
            }
            out.push(node);
            for child in node.children() {
                collect(child, out);
            }
        }

        let mut out = Vec::new();
        collect(&self.root, &mut out);
        out
    }

    /// Returns the distinct attributions of the visible layers, in
    /// traversal order.
    #[must_use]
    pub fn copyrights(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for copyright in self.visible_layers().into_iter().filter_map(LayerNode::copyright) {
            if !out.contains(&copyright) {
                out.push(copyright);
            }
        }
        out
    }

    // -- Topology --

    /// Adds `node` (with its descendants) as the first child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::UnknownLayer`] if `parent` is not in the tree and
    /// [`LayerError::DuplicateKey`] if any key in `node`'s subtree already is.
    pub fn add_layer(&mut self, parent: &str, node: LayerNode) -> Result<(), LayerError> {
        let path = self.path_of(parent).ok_or_else(|| unknown(parent))?;
        let existing: BTreeSet<&LayerKey> = self.iter().map(LayerNode::key).collect();
        let mut incoming = BTreeSet::new();
        for added in &node {
            if existing.contains(added.key()) || !incoming.insert(added.key()) {
                return Err(LayerError::DuplicateKey(added.key().clone()));
            }
        }
        self.node_at_mut(&path).add_child(node);
        Ok(())
    }

    /// Detaches the layer with this key from its parent and returns it with
    /// its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::UnknownLayer`] for unknown keys and
    /// [`LayerError::RootLayer`] for the root.
    pub fn remove_layer(&mut self, key: &str) -> Result<LayerNode, LayerError> {
        let path = self.path_of(key).ok_or_else(|| unknown(key))?;
        let Some((_, parent)) = path.split_last() else {
            return Err(LayerError::RootLayer(self.root.key().clone()));
        };
        self.node_at_mut(parent)
            .remove_child_by_key(key)
            .ok_or_else(|| unknown(key))
    }

    // -- Surface and kind hooks --

    /// Attaches every layer to `surface`, in traversal order.
    pub fn attach(&mut self, surface: &mut dyn LayerSurface) {
        self.attach_traced(surface, &mut Tracer::none());
    }

    /// Like [`attach`](Self::attach), reporting each attachment to `tracer`.
    pub fn attach_traced(&mut self, surface: &mut dyn LayerSurface, tracer: &mut Tracer<'_>) {
        fn walk(node: &mut LayerNode, surface: &mut dyn LayerSurface, tracer: &mut Tracer<'_>) {
            node.attach(surface);
            if tracer.is_active() {
                tracer.attach(&AttachEvent {
                    key: node.key().clone(),
                    surface: surface.id(),
                    registered: node.renderable().is_some(),
                });
            }
            for child in node.children_mut() {
                walk(child, surface, tracer);
            }
        }

        walk(&mut self.root, surface, tracer);
    }

    /// Forwards a click to the layer with this key.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::UnknownLayer`] for unknown keys.
    pub fn click(&mut self, key: &str) -> Result<(), LayerError> {
        self.get_mut(key).ok_or_else(|| unknown(key))?.on_click();
        Ok(())
    }

    /// Queries every visible layer for features at `coordinate`.
    ///
    /// Layers are queried one after another in traversal order. Only results
    /// with at least one feature are kept; layers that report no hit or an
    /// empty result (such as [`PlainLayer`](crate::layer::PlainLayer)) are
    /// left out. Query a single layer through [`LayerNode::feature_info_at`]
    /// to see its empty result.
    pub async fn feature_info_at(&self, coordinate: Point) -> Vec<FeatureInfo> {
        let mut out = Vec::new();
        for node in self.visible_layers() {
            match node.feature_info_at(coordinate).await {
                Some(info) if !info.features.is_empty() => out.push(info),
                _ => {}
            }
        }
        out
    }

    // -- Internal helpers --

    /// Returns the child-index path to the layer with this key.
    fn path_of(&self, key: &str) -> Option<Vec<usize>> {
        fn search(node: &LayerNode, key: &str, path: &mut Vec<usize>) -> bool {
            if node.key() == key {
                return true;
            }
            for (idx, child) in node.children().iter().enumerate() {
                path.push(idx);
                if search(child, key, path) {
                    return true;
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        search(&self.root, key, &mut path).then_some(path)
    }

    /// Returns the paths of all layers whose effective radio group is `group`.
    fn group_paths(&self, group: &str) -> Vec<Vec<usize>> {
        fn collect(
            node: &LayerNode,
            group: &str,
            path: &mut Vec<usize>,
            out: &mut Vec<Vec<usize>>,
        ) {
            if node.radio_group() == Some(group) {
                out.push(path.clone());
            }
            for (idx, child) in node.children().iter().enumerate() {
                path.push(idx);
                collect(child, group, path, out);
                path.pop();
            }
        }

        let mut out = Vec::new();
        collect(&self.root, group, &mut Vec::new(), &mut out);
        out
    }

    /// Panics if the path does not resolve.
    fn node_at(&self, path: &[usize]) -> &LayerNode {
        path.iter().fold(&self.root, |node, &idx| &node.children()[idx])
    }

    /// Panics if the path does not resolve.
    fn node_at_mut(&mut self, path: &[usize]) -> &mut LayerNode {
        let mut node = &mut self.root;
        for &idx in path {
            node = &mut node.children_mut()[idx];
        }
        node
    }
}

fn unknown(key: &str) -> LayerError {
    LayerError::UnknownLayer(LayerKey::new(key))
}
