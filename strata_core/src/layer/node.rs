// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layer node: identity, flags, visibility, and children.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

use super::key::LayerKey;
use super::kind::{FeatureInfoFuture, LayerKind, PlainLayer};
use super::traverse::{DepthFirst, VisibleChildren};
use crate::error::LayerError;
use crate::event::{EventKind, LayerEvent, ListenerKey, Observable, Propagation, VisibilityEvent};
use crate::render::{LayerSurface, Renderable, SurfaceId};

/// Radio group reported by base layers that have no explicit group.
pub const BASE_LAYER_GROUP: &str = "baseLayer";

/// Construction options for a [`LayerNode`].
///
/// Either `name` or `key` must be set; everything else has a default.
pub struct LayerOptions {
    /// Explicit key. Falls back to the lower-cased name when absent or empty.
    pub key: Option<String>,
    /// Human-readable label. Falls back to the key text when absent.
    pub name: Option<String>,
    /// Drawable handle owned by the rendering engine.
    pub renderable: Option<Rc<dyn Renderable>>,
    /// Radio-group tag.
    pub radio_group: Option<String>,
    /// Whether the layer is a base-layer candidate.
    pub is_base_layer: bool,
    /// Presentation hint for legends; not interpreted by the core.
    pub hide_in_legend: bool,
    /// Initial visibility. Defaults to `true`.
    pub visible: bool,
    /// Attribution text.
    pub copyright: Option<String>,
    /// Click and feature-lookup behavior. Defaults to [`PlainLayer`].
    pub kind: Option<Box<dyn LayerKind>>,
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            key: None,
            name: None,
            renderable: None,
            radio_group: None,
            is_base_layer: false,
            hide_in_legend: false,
            visible: true,
            copyright: None,
            kind: None,
        }
    }
}

impl fmt::Debug for LayerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerOptions")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("renderable", &self.renderable.is_some())
            .field("radio_group", &self.radio_group)
            .field("is_base_layer", &self.is_base_layer)
            .field("hide_in_legend", &self.hide_in_legend)
            .field("visible", &self.visible)
            .field("copyright", &self.copyright)
            .field("kind", &self.kind.is_some())
            .finish()
    }
}

impl LayerOptions {
    /// Options for a layer with the given name and default everything else.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets an explicit key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attaches a drawable handle.
    #[must_use]
    pub fn with_renderable(mut self, renderable: Rc<dyn Renderable>) -> Self {
        self.renderable = Some(renderable);
        self
    }

    /// Sets the radio-group tag.
    #[must_use]
    pub fn with_radio_group(mut self, group: impl Into<String>) -> Self {
        self.radio_group = Some(group.into());
        self
    }

    /// Marks the layer as a base-layer candidate.
    #[must_use]
    pub fn base_layer(mut self) -> Self {
        self.is_base_layer = true;
        self
    }

    /// Hints that legends should not list the layer.
    #[must_use]
    pub fn hidden_in_legend(mut self) -> Self {
        self.hide_in_legend = true;
        self
    }

    /// Sets the initial visibility.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets the attribution text.
    #[must_use]
    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = Some(copyright.into());
        self
    }

    /// Sets the layer kind.
    #[must_use]
    pub fn with_kind(mut self, kind: impl LayerKind + 'static) -> Self {
        self.kind = Some(Box::new(kind));
        self
    }
}

/// One layer in a layer tree.
///
/// A node is the sole writer of its own state. Other nodes and coordinators
/// change it only through its public methods.
pub struct LayerNode {
    key: LayerKey,
    name: String,
    renderable: Option<Rc<dyn Renderable>>,
    kind: Box<dyn LayerKind>,
    radio_group: Option<String>,
    is_base_layer: bool,
    hide_in_legend: bool,
    visible: bool,
    copyright: Option<String>,
    children: Vec<LayerNode>,
    surface: Option<SurfaceId>,
    observable: Observable,
}

impl fmt::Debug for LayerNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerNode")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("visible", &self.visible)
            .field("radio_group", &self.radio_group)
            .field("is_base_layer", &self.is_base_layer)
            .field("hide_in_legend", &self.hide_in_legend)
            .field("copyright", &self.copyright)
            .field("surface", &self.surface)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

impl LayerNode {
    /// Creates a layer.
    ///
    /// If a renderable is attached, its visibility is synchronized to the
    /// initial `visible` value immediately.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::MissingIdentity`] if neither a non-empty name nor
    /// a non-empty key is given. An empty string counts as absent for both
    /// fields: an empty key falls back to the name, and an empty name never
    /// derives an empty key.
    pub fn new(options: LayerOptions) -> Result<Self, LayerError> {
        let name = options.name.filter(|n| !n.is_empty());
        let key = match (options.key.filter(|k| !k.is_empty()), &name) {
            (Some(key), _) => LayerKey::new(key),
            (None, Some(name)) => LayerKey::from_name(name),
            (None, None) => return Err(LayerError::MissingIdentity),
        };
        let name = name.unwrap_or_else(|| String::from(key.as_str()));

        if let Some(renderable) = &options.renderable {
            renderable.set_visible(options.visible);
        }

        Ok(Self {
            key,
            name,
            renderable: options.renderable,
            kind: options.kind.unwrap_or_else(|| Box::new(PlainLayer)),
            radio_group: options.radio_group,
            is_base_layer: options.is_base_layer,
            hide_in_legend: options.hide_in_legend,
            visible: options.visible,
            copyright: options.copyright,
            children: Vec::new(),
            surface: None,
            observable: Observable::new(),
        })
    }

    /// Binds the layer to a surface and registers its renderable there.
    ///
    /// Callers attach each node once; attaching again registers the
    /// renderable again.
    pub fn attach(&mut self, surface: &mut dyn LayerSurface) {
        self.surface = Some(surface.id());
        if let Some(renderable) = &self.renderable {
            surface.add_renderable(Rc::clone(renderable));
        }
    }

    // -- Accessors --

    /// Returns the layer key.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &LayerKey {
        &self.key
    }

    /// Returns the layer name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attribution text.
    #[must_use]
    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    /// Returns whether the layer is visible.
    #[inline]
    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Returns whether the layer is a base-layer candidate.
    #[must_use]
    pub fn is_base_layer(&self) -> bool {
        self.is_base_layer
    }

    /// Returns the legend hint.
    #[must_use]
    pub fn hide_in_legend(&self) -> bool {
        self.hide_in_legend
    }

    /// Returns the effective radio group.
    ///
    /// An unset or empty group falls back to [`BASE_LAYER_GROUP`] for base
    /// layers and to `None` otherwise.
    #[must_use]
    pub fn radio_group(&self) -> Option<&str> {
        match self.radio_group.as_deref() {
            Some(group) if !group.is_empty() => Some(group),
            _ if self.is_base_layer => Some(BASE_LAYER_GROUP),
            _ => None,
        }
    }

    /// Returns the attached drawable handle.
    #[must_use]
    pub fn renderable(&self) -> Option<&Rc<dyn Renderable>> {
        self.renderable.as_ref()
    }

    /// Returns the surface this layer was attached to.
    #[must_use]
    pub fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }

    /// Returns the layer kind.
    #[must_use]
    pub fn kind(&self) -> &dyn LayerKind {
        &*self.kind
    }

    // -- Mutation --

    /// Overwrites the stored radio-group tag. Emits nothing.
    pub fn set_radio_group(&mut self, group: Option<String>) {
        self.radio_group = group;
    }

    /// Changes the layer's visibility.
    ///
    /// If `visible` equals the current state this does nothing and returns
    /// `None`: no mutation, no renderable call, no event. Otherwise the flag is
    /// updated, the renderable synchronized, and a
    /// [`ChangeVisible`](EventKind::ChangeVisible) event carrying `propagation`
    /// is dispatched to listeners before this returns. The same event is
    /// returned so a coordinator can act on it.
    ///
    /// The node never propagates the change itself.
    pub fn set_visible(
        &mut self,
        visible: bool,
        propagation: Propagation,
    ) -> Option<VisibilityEvent> {
        if visible == self.visible {
            return None;
        }

        self.visible = visible;
        if let Some(renderable) = &self.renderable {
            renderable.set_visible(visible);
        }

        let event = LayerEvent::ChangeVisible(VisibilityEvent {
            source: self.key.clone(),
            visible,
            propagation,
        });
        self.observable.dispatch(&event);
        let LayerEvent::ChangeVisible(event) = event;
        Some(event)
    }

    /// Registers a listener for events of `kind` emitted by this layer.
    pub fn on(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&LayerEvent) + 'static,
    ) -> ListenerKey {
        self.observable.on(kind, listener)
    }

    /// Unregisters a listener. Returns whether it was registered.
    pub fn un(&mut self, key: ListenerKey) -> bool {
        self.observable.un(key)
    }

    // -- Children --

    /// Returns the children in display order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns the children for calling their public methods.
    pub fn children_mut(&mut self) -> &mut [Self] {
        &mut self.children
    }

    /// Replaces all children. Duplicate keys are not checked.
    pub fn set_children(&mut self, children: Vec<Self>) {
        self.children = children;
    }

    /// Inserts a child at the front, so the newest child comes first.
    pub fn add_child(&mut self, child: Self) {
        self.children.insert(0, child);
    }

    /// Removes the first child named `name` and returns it.
    ///
    /// Returns `None`, leaving the children untouched, if no child matches.
    pub fn remove_child(&mut self, name: &str) -> Option<Self> {
        let idx = self.children.iter().position(|c| c.name == name)?;
        Some(self.children.remove(idx))
    }

    /// Removes the direct child with key `key` and returns it.
    pub fn remove_child_by_key(&mut self, key: &str) -> Option<Self> {
        let idx = self.children.iter().position(|c| c.key == key)?;
        Some(self.children.remove(idx))
    }

    /// Returns the visible direct children, in order.
    #[must_use]
    pub fn visible_children(&self) -> VisibleChildren<'_> {
        VisibleChildren::new(&self.children)
    }

    /// Returns whether any direct child is visible.
    #[must_use]
    pub fn has_visible_children(&self) -> bool {
        self.has_children(true)
    }

    /// Returns whether any direct child's visibility equals `visible`.
    ///
    /// `has_children(false)` tests for at least one hidden child.
    #[must_use]
    pub fn has_children(&self, visible: bool) -> bool {
        self.children.iter().any(|c| c.visible == visible)
    }

    /// Returns a depth-first pre-order iterator over this layer and its
    /// descendants.
    #[must_use]
    pub fn iter(&self) -> DepthFirst<'_> {
        DepthFirst::new(self)
    }

    // -- Kind hooks --

    /// Forwards a click to the layer kind.
    pub fn on_click(&mut self) {
        self.kind.on_click(&self.key);
    }

    /// Looks up features at `coordinate` through the layer kind.
    ///
    /// The returned future never fails. The default kind resolves to an empty
    /// result for this layer.
    pub fn feature_info_at(&self, coordinate: Point) -> FeatureInfoFuture<'_> {
        self.kind.feature_info_at(&self.key, coordinate)
    }
}

impl<'a> IntoIterator for &'a LayerNode {
    type Item = &'a LayerNode;
    type IntoIter = DepthFirst<'a>;

    fn into_iter(self) -> DepthFirst<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use core::cell::{Cell, RefCell};

    use futures::executor::block_on;

    use super::*;
    use crate::layer::kind::FeatureInfo;
    use crate::render::testing::{RecordingRenderable, RecordingSurface};

    fn layer(name: &str) -> LayerNode {
        LayerNode::new(LayerOptions::named(name)).unwrap()
    }

    fn hidden(name: &str) -> LayerNode {
        LayerNode::new(LayerOptions::named(name).with_visible(false)).unwrap()
    }

    fn names(nodes: &[LayerNode]) -> Vec<&str> {
        nodes.iter().map(LayerNode::name).collect()
    }

    #[test]
    fn construction_requires_identity() {
        let err = LayerNode::new(LayerOptions::default()).unwrap_err();
        assert_eq!(err, LayerError::MissingIdentity);
        let err = LayerNode::new(LayerOptions::named("")).unwrap_err();
        assert_eq!(err, LayerError::MissingIdentity);
    }

    #[test]
    fn key_derived_from_name() {
        let node = layer("Swiss Topo");
        assert_eq!(node.key(), "swiss topo");
        assert_eq!(node.name(), "Swiss Topo");
    }

    #[test]
    fn empty_name_and_empty_key_are_absent() {
        let err = LayerNode::new(LayerOptions::named("").with_key("")).unwrap_err();
        assert_eq!(err, LayerError::MissingIdentity);
        let node = LayerNode::new(LayerOptions::named("").with_key("osm")).unwrap();
        assert_eq!(node.key(), "osm");
        assert_eq!(node.name(), "osm");
    }

    #[test]
    fn explicit_key_wins_and_empty_key_falls_back() {
        let node = LayerNode::new(LayerOptions::named("OSM").with_key("osm-base")).unwrap();
        assert_eq!(node.key(), "osm-base");
        let node = LayerNode::new(LayerOptions::named("OSM").with_key("")).unwrap();
        assert_eq!(node.key(), "osm");
    }

    #[test]
    fn key_only_names_the_layer_after_the_key() {
        let node = LayerNode::new(LayerOptions::default().with_key("osm")).unwrap();
        assert_eq!(node.name(), "osm");
    }

    #[test]
    fn defaults() {
        let node = layer("a");
        assert!(node.visible());
        assert!(!node.is_base_layer());
        assert!(!node.hide_in_legend());
        assert_eq!(node.copyright(), None);
        assert_eq!(node.radio_group(), None);
        assert!(node.children().is_empty());
        assert_eq!(node.surface(), None);
    }

    #[test]
    fn construction_syncs_renderable() {
        let r = Rc::new(RecordingRenderable::default());
        let _node =
            LayerNode::new(LayerOptions::named("a").with_renderable(r.clone()).with_visible(false))
                .unwrap();
        assert_eq!(*r.calls.borrow(), vec![false]);
    }

    #[test]
    fn radio_group_fallback() {
        let base = LayerNode::new(LayerOptions::named("a").base_layer()).unwrap();
        assert_eq!(base.radio_group(), Some(BASE_LAYER_GROUP));

        let plain = layer("b");
        assert_eq!(plain.radio_group(), None);

        let grouped = LayerNode::new(
            LayerOptions::named("c").base_layer().with_radio_group("tiles"),
        )
        .unwrap();
        assert_eq!(grouped.radio_group(), Some("tiles"));
        let grouped = LayerNode::new(LayerOptions::named("d").with_radio_group("tiles")).unwrap();
        assert_eq!(grouped.radio_group(), Some("tiles"));
    }

    #[test]
    fn set_radio_group_overwrites() {
        let mut node = LayerNode::new(LayerOptions::named("a").base_layer()).unwrap();
        node.set_radio_group(Some("overlay".into()));
        assert_eq!(node.radio_group(), Some("overlay"));
        node.set_radio_group(None);
        assert_eq!(node.radio_group(), Some(BASE_LAYER_GROUP));
    }

    #[test]
    fn set_visible_same_value_is_noop() {
        let r = Rc::new(RecordingRenderable::default());
        let mut node = LayerNode::new(LayerOptions::named("a").with_renderable(r.clone())).unwrap();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        node.on(EventKind::ChangeVisible, move |_| h.set(h.get() + 1));

        assert_eq!(node.set_visible(true, Propagation::ALL), None);
        assert!(node.visible());
        assert_eq!(hits.get(), 0);
        assert_eq!(*r.calls.borrow(), vec![true], "only the construction sync");
    }

    #[test]
    fn set_visible_syncs_renderable_once() {
        let r = Rc::new(RecordingRenderable::default());
        let mut node = LayerNode::new(LayerOptions::named("a").with_renderable(r.clone())).unwrap();
        r.calls.borrow_mut().clear();

        node.set_visible(false, Propagation::ALL);
        assert!(!node.visible());
        assert_eq!(*r.calls.borrow(), vec![false]);
    }

    #[test]
    fn set_visible_emits_flags_verbatim() {
        let mut node = layer("a");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        node.on(EventKind::ChangeVisible, move |e| s.borrow_mut().push(e.clone()));

        let propagation = Propagation::ALL.without_up().without_siblings();
        let returned = node.set_visible(false, propagation).expect("state changed");

        assert_eq!(returned.source, "a");
        assert!(!returned.visible);
        assert_eq!(returned.propagation, propagation);
        assert_eq!(*seen.borrow(), vec![LayerEvent::ChangeVisible(returned)]);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let mut node = layer("a");
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let key = node.on(EventKind::ChangeVisible, move |_| h.set(h.get() + 1));
        assert!(node.un(key));
        node.set_visible(false, Propagation::ALL);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn attach_registers_renderable() {
        let r = Rc::new(RecordingRenderable::default());
        let mut node = LayerNode::new(LayerOptions::named("a").with_renderable(r)).unwrap();
        let mut surface = RecordingSurface {
            id: 7,
            ..RecordingSurface::default()
        };
        node.attach(&mut surface);
        assert_eq!(node.surface(), Some(SurfaceId(7)));
        assert_eq!(surface.added.len(), 1);

        let mut bare = layer("b");
        bare.attach(&mut surface);
        assert_eq!(bare.surface(), Some(SurfaceId(7)));
        assert_eq!(surface.added.len(), 1, "no renderable, nothing registered");
    }

    #[test]
    fn add_child_puts_newest_first() {
        let mut root = layer("root");
        root.add_child(layer("n"));
        root.add_child(layer("m"));
        assert_eq!(names(root.children()), ["m", "n"]);
    }

    #[test]
    fn set_children_replaces() {
        let mut root = layer("root");
        root.add_child(layer("old"));
        root.set_children(vec![layer("a"), layer("b")]);
        assert_eq!(names(root.children()), ["a", "b"]);
    }

    #[test]
    fn remove_child_removes_first_match_only() {
        let mut root = layer("root");
        root.set_children(vec![
            LayerNode::new(LayerOptions::named("X").with_key("x1")).unwrap(),
            layer("Y"),
            LayerNode::new(LayerOptions::named("X").with_key("x2")).unwrap(),
        ]);

        let removed = root.remove_child("X").expect("a child named X");
        assert_eq!(removed.key(), "x1");
        assert_eq!(names(root.children()), ["Y", "X"]);
        assert_eq!(root.children()[1].key(), "x2");
    }

    #[test]
    fn remove_child_without_match_is_silent() {
        let mut root = layer("root");
        root.add_child(layer("a"));
        assert!(root.remove_child("nope").is_none());
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn remove_child_by_key() {
        let mut root = layer("root");
        root.set_children(vec![layer("A"), layer("B")]);
        assert_eq!(root.remove_child_by_key("b").map(|n| n.key().clone()), Some("b".into()));
        assert_eq!(names(root.children()), ["A"]);
    }

    #[test]
    fn visible_children_preserve_order() {
        let mut root = layer("root");
        root.set_children(vec![layer("a"), hidden("b"), layer("c"), hidden("d")]);
        let visible: Vec<_> = root.visible_children().map(LayerNode::name).collect();
        assert_eq!(visible, ["a", "c"]);
    }

    #[test]
    fn has_children_by_visibility() {
        let mut root = layer("root");
        assert!(!root.has_visible_children());
        assert!(!root.has_children(false));

        root.set_children(vec![layer("a"), layer("b")]);
        assert!(root.has_visible_children());
        assert!(!root.has_children(false));

        root.children_mut()[1].set_visible(false, Propagation::NONE);
        assert!(root.has_children(false));
        assert!(root.has_children(true));

        root.children_mut()[0].set_visible(false, Propagation::NONE);
        assert!(!root.has_visible_children());
    }

    #[test]
    fn iter_is_depth_first_pre_order() {
        let mut a = layer("a");
        a.set_children(vec![layer("a1"), layer("a2")]);
        let mut root = layer("root");
        root.set_children(vec![a, layer("b")]);

        let order: Vec<_> = root.iter().map(LayerNode::name).collect();
        assert_eq!(order, ["root", "a", "a1", "a2", "b"]);
    }

    #[test]
    fn default_feature_info_is_empty() {
        let node = layer("a");
        let info = block_on(node.feature_info_at(Point::new(3.0, 4.0)));
        assert_eq!(info, Some(FeatureInfo::empty("a".into(), Point::new(3.0, 4.0))));
    }

    #[test]
    fn on_click_reaches_the_kind() {
        struct Clicks(Rc<RefCell<Vec<LayerKey>>>);
        impl LayerKind for Clicks {
            fn on_click(&mut self, layer: &LayerKey) {
                self.0.borrow_mut().push(layer.clone());
            }
        }

        let clicks = Rc::new(RefCell::new(Vec::new()));
        let mut node =
            LayerNode::new(LayerOptions::named("a").with_kind(Clicks(Rc::clone(&clicks)))).unwrap();
        node.on_click();
        node.on_click();
        assert_eq!(*clicks.borrow(), vec![LayerKey::new("a"), LayerKey::new("a")]);

        let mut plain = layer("b");
        plain.on_click();
    }
}
