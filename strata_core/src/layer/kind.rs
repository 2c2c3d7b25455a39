// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer kinds: per-node click handling and feature lookup.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::future::{Future, ready};
use core::pin::Pin;

use kurbo::Point;

use super::key::LayerKey;

/// A deferred feature lookup.
///
/// Resolves to `None` when the layer kind reports that nothing was hit, and
/// never fails; errors in the underlying data source are reported as an
/// empty or absent result.
pub type FeatureInfoFuture<'a> = Pin<Box<dyn Future<Output = Option<FeatureInfo>> + 'a>>;

/// A feature found at a map coordinate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Feature {
    /// Identifier in the source data, if it has one.
    pub id: Option<String>,
    /// Location of the feature in map coordinates.
    pub location: Option<Point>,
    /// Attribute table.
    pub properties: BTreeMap<String, String>,
}

impl Feature {
    /// Creates a feature at `location` with no attributes.
    #[must_use]
    pub fn at(id: impl Into<String>, location: Point) -> Self {
        Self {
            id: Some(id.into()),
            location: Some(location),
            properties: BTreeMap::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

/// Result of a feature lookup on one layer.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureInfo {
    /// Key of the layer that was queried.
    pub layer: LayerKey,
    /// The queried coordinate.
    pub coordinate: Point,
    /// Features at the coordinate, in source order. May be empty.
    pub features: Vec<Feature>,
}

impl FeatureInfo {
    /// Creates a result with no features.
    #[must_use]
    pub fn empty(layer: LayerKey, coordinate: Point) -> Self {
        Self {
            layer,
            coordinate,
            features: Vec::new(),
        }
    }
}

/// Behavior that varies between kinds of layers.
///
/// Both methods have default implementations, so a kind only overrides what
/// it supports.
pub trait LayerKind {
    /// Called when the user clicks the layer.
    fn on_click(&mut self, layer: &LayerKey) {
        _ = layer;
    }

    /// Looks up features at `coordinate`.
    ///
    /// The default resolves to an empty result for `layer`.
    fn feature_info_at(&self, layer: &LayerKey, coordinate: Point) -> FeatureInfoFuture<'_> {
        Box::pin(ready(Some(FeatureInfo::empty(layer.clone(), coordinate))))
    }
}

/// A layer with no click behavior and no queryable features.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainLayer;

impl LayerKind for PlainLayer {}

/// A layer backed by an in-memory list of point features.
///
/// A lookup hits every feature whose location lies within `tolerance` map
/// units of the queried coordinate. Clicking the layer records nothing.
#[derive(Clone, Debug, Default)]
pub struct PointFeatures {
    features: Vec<Feature>,
    tolerance: f64,
}

impl PointFeatures {
    /// Creates a point layer with the given hit tolerance.
    #[must_use]
    pub fn new(features: Vec<Feature>, tolerance: f64) -> Self {
        Self {
            features,
            tolerance,
        }
    }

    /// Returns the features of this layer.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    fn hits(&self, coordinate: Point) -> Vec<Feature> {
        self.features
            .iter()
            .filter(|f| {
                f.location
                    .is_some_and(|at| at.distance(coordinate) <= self.tolerance)
            })
            .cloned()
            .collect()
    }
}

impl LayerKind for PointFeatures {
    fn feature_info_at(&self, layer: &LayerKey, coordinate: Point) -> FeatureInfoFuture<'_> {
        let features = self.hits(coordinate);
        let info = (!features.is_empty()).then(|| FeatureInfo {
            layer: layer.clone(),
            coordinate,
            features,
        });
        Box::pin(ready(info))
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn plain_layer_resolves_empty() {
        let key = LayerKey::new("osm");
        let info = block_on(PlainLayer.feature_info_at(&key, Point::new(1.0, 2.0)));
        assert_eq!(info, Some(FeatureInfo::empty(key, Point::new(1.0, 2.0))));
    }

    #[test]
    fn point_features_hit_within_tolerance() {
        let kind = PointFeatures::new(
            alloc::vec![
                Feature::at("bern", Point::new(0.0, 0.0)).with_property("kind", "city"),
                Feature::at("thun", Point::new(10.0, 0.0)),
                Feature::at("biel", Point::new(1.5, 2.0)),
            ],
            2.5,
        );
        let key = LayerKey::new("stations");
        let info = block_on(kind.feature_info_at(&key, Point::new(0.0, 0.0)))
            .expect("two features are in range");
        let ids: Vec<_> = info.features.iter().filter_map(|f| f.id.as_deref()).collect();
        assert_eq!(ids, ["bern", "biel"]);
        assert_eq!(info.layer, key);
        assert_eq!(info.features[0].properties["kind"], "city");
    }

    #[test]
    fn point_features_miss_resolves_none() {
        let kind = PointFeatures::new(alloc::vec![Feature::at("thun", Point::new(10.0, 0.0))], 1.0);
        let info = block_on(kind.feature_info_at(&LayerKey::new("stations"), Point::ORIGIN));
        assert_eq!(info, None);
    }
}
