// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use alloc::vec::Vec;
use core::slice;

use super::node::LayerNode;

/// An iterator over the visible direct children of a layer, in order.
///
/// Created by [`LayerNode::visible_children`].
#[derive(Debug)]
pub struct VisibleChildren<'a> {
    inner: slice::Iter<'a, LayerNode>,
}

impl<'a> VisibleChildren<'a> {
    pub(crate) fn new(children: &'a [LayerNode]) -> Self {
        Self {
            inner: children.iter(),
        }
    }
}

impl<'a> Iterator for VisibleChildren<'a> {
    type Item = &'a LayerNode;

    fn next(&mut self) -> Option<&'a LayerNode> {
        self.inner.by_ref().find(|child| child.visible())
    }
}

/// A depth-first pre-order iterator over a layer and all its descendants.
///
/// Created by [`LayerNode::iter`] and [`LayerTree::iter`](crate::tree::LayerTree::iter).
#[derive(Debug)]
pub struct DepthFirst<'a> {
    start: Option<&'a LayerNode>,
    stack: Vec<slice::Iter<'a, LayerNode>>,
}

impl<'a> DepthFirst<'a> {
    pub(crate) fn new(root: &'a LayerNode) -> Self {
        Self {
            start: Some(root),
            stack: Vec::new(),
        }
    }
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a LayerNode;

    fn next(&mut self) -> Option<&'a LayerNode> {
        if let Some(root) = self.start.take() {
            self.stack.push(root.children().iter());
            return Some(root);
        }
        loop {
            let top = self.stack.last_mut()?;
            if let Some(node) = top.next() {
                self.stack.push(node.children().iter());
                return Some(node);
            }
            self.stack.pop();
        }
    }
}
