// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility propagation.
//!
//! A change is applied to the addressed node first. If the node's no-op guard
//! lets it through, the tree reacts to the emitted event in three directions,
//! each gated by one [`Propagation`] flag:
//!
//! 1. **Down**: hiding hides every child. Showing shows every child that has
//!    no radio group; for each radio group among the children, the member
//!    that is already visible is kept, otherwise the first member is shown.
//!    Forwarded with `suppress_up`, since the parent already decided.
//! 2. **Up**: a shown node shows its hidden parent; a hidden node hides its
//!    visible parent once no child of it is visible. Forwarded with
//!    `suppress_down`, so the parent's other children keep their state.
//! 3. **Sibling**: only when showing, and after the upward pass. Every other
//!    visible layer in the tree sharing the node's effective radio group is
//!    hidden. Forwarded with `suppress_siblings`.
//!
//! Every forwarded change goes through the node guard again, which is what
//! terminates the cascade: a node already in the requested state emits
//! nothing and forwards nothing.

use alloc::string::String;
use alloc::vec::Vec;

use super::{LayerTree, unknown};
use crate::error::LayerError;
use crate::event::{Propagation, VisibilityEvent};
use crate::layer::LayerNode;
use crate::trace::{Direction, PropagationEvent, SuppressedEvent, Tracer, VisibilityChangeEvent};

impl LayerTree {
    /// Sets the visibility of the layer with this key and cascades the change.
    ///
    /// Returns every effective change in the order it was applied, starting
    /// with the addressed layer. An empty vector means the layer was already
    /// in the requested state.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::UnknownLayer`] for unknown keys.
    pub fn set_visible(
        &mut self,
        key: &str,
        visible: bool,
        propagation: Propagation,
    ) -> Result<Vec<VisibilityEvent>, LayerError> {
        self.set_visible_traced(key, visible, propagation, &mut Tracer::none())
    }

    /// Like [`set_visible`](Self::set_visible), reporting the cascade to
    /// `tracer`.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::UnknownLayer`] for unknown keys.
    pub fn set_visible_traced(
        &mut self,
        key: &str,
        visible: bool,
        propagation: Propagation,
        tracer: &mut Tracer<'_>,
    ) -> Result<Vec<VisibilityEvent>, LayerError> {
        let path = self.path_of(key).ok_or_else(|| unknown(key))?;
        let mut changes = Vec::new();
        self.apply(&path, visible, propagation, 0, &mut changes, tracer);
        Ok(changes)
    }

    fn apply(
        &mut self,
        path: &[usize],
        visible: bool,
        propagation: Propagation,
        depth: u32,
        changes: &mut Vec<VisibilityEvent>,
        tracer: &mut Tracer<'_>,
    ) {
        let Some(event) = self.node_at_mut(path).set_visible(visible, propagation) else {
            return;
        };
        if tracer.is_active() {
            tracer.visibility_change(&VisibilityChangeEvent {
                key: event.source.clone(),
                visible,
                propagation,
                depth,
            });
        }
        changes.push(event);

        if propagation.suppress_down {
            self.trace_suppressed(path, Direction::Down, tracer);
        } else {
            self.cascade_down(path, visible, depth, changes, tracer);
        }

        // Ancestors are shown before group mates are hidden, so a mate's
        // upward pass never sees them without a visible child.
        if propagation.suppress_up {
            self.trace_suppressed(path, Direction::Up, tracer);
        } else {
            self.aggregate_up(path, visible, depth, changes, tracer);
        }

        if visible {
            if propagation.suppress_siblings {
                self.trace_suppressed(path, Direction::Sibling, tracer);
            } else {
                self.deselect_siblings(path, depth, changes, tracer);
            }
        }
    }

    fn cascade_down(
        &mut self,
        path: &[usize],
        visible: bool,
        depth: u32,
        changes: &mut Vec<VisibilityEvent>,
        tracer: &mut Tracer<'_>,
    ) {
        let targets = down_targets(self.node_at(path), visible);
        let mut child_path = path.to_vec();
        child_path.push(0);
        for (idx, child_visible) in targets {
            if let Some(last) = child_path.last_mut() {
                *last = idx;
            }
            self.trace_forward(path, &child_path, Direction::Down, child_visible, tracer);
            self.apply(
                &child_path,
                child_visible,
                Propagation::ALL.without_up(),
                depth + 1,
                changes,
                tracer,
            );
        }
    }

    fn deselect_siblings(
        &mut self,
        path: &[usize],
        depth: u32,
        changes: &mut Vec<VisibilityEvent>,
        tracer: &mut Tracer<'_>,
    ) {
        let Some(group) = self.node_at(path).radio_group().map(String::from) else {
            return;
        };
        let mates: Vec<Vec<usize>> = self
            .group_paths(&group)
            .into_iter()
            .filter(|mate| mate.as_slice() != path && self.node_at(mate).visible())
            .collect();
        for mate in mates {
            self.trace_forward(path, &mate, Direction::Sibling, false, tracer);
            self.apply(
                &mate,
                false,
                Propagation::ALL.without_siblings(),
                depth + 1,
                changes,
                tracer,
            );
        }
    }

    fn aggregate_up(
        &mut self,
        path: &[usize],
        visible: bool,
        depth: u32,
        changes: &mut Vec<VisibilityEvent>,
        tracer: &mut Tracer<'_>,
    ) {
        let Some((_, parent_path)) = path.split_last() else {
            return;
        };
        let parent = self.node_at(parent_path);
        let follow = if visible {
            !parent.visible()
        } else {
            parent.visible() && !parent.has_visible_children()
        };
        if !follow {
            return;
        }
        self.trace_forward(path, parent_path, Direction::Up, visible, tracer);
        self.apply(
            parent_path,
            visible,
            Propagation::ALL.without_down(),
            depth + 1,
            changes,
            tracer,
        );
    }

    fn trace_forward(
        &self,
        from: &[usize],
        to: &[usize],
        direction: Direction,
        visible: bool,
        tracer: &mut Tracer<'_>,
    ) {
        if tracer.is_active() {
            tracer.propagation(&PropagationEvent {
                from: self.node_at(from).key().clone(),
                to: self.node_at(to).key().clone(),
                direction,
                visible,
            });
        }
    }

    fn trace_suppressed(&self, path: &[usize], direction: Direction, tracer: &mut Tracer<'_>) {
        if tracer.is_active() {
            tracer.suppressed(&SuppressedEvent {
                key: self.node_at(path).key().clone(),
                direction,
            });
        }
    }
}

/// Picks the children a downward cascade touches, with their new visibility.
fn down_targets(node: &LayerNode, visible: bool) -> Vec<(usize, bool)> {
    let children = node.children();
    if !visible {
        return (0..children.len()).map(|idx| (idx, false)).collect();
    }

    let mut seen_groups: Vec<&str> = Vec::new();
    let mut targets = Vec::new();
    for (idx, child) in children.iter().enumerate() {
        let Some(group) = child.radio_group() else {
            targets.push((idx, true));
            continue;
        };
        if seen_groups.contains(&group) {
            continue;
        }
        seen_groups.push(group);
        let selected = children
            .iter()
            .enumerate()
            .skip(idx)
            .find(|(_, c)| c.radio_group() == Some(group) && c.visible())
            .map_or(idx, |(i, _)| i);
        targets.push((selected, true));
    }
    targets
}
