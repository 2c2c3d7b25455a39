// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for layer construction and tree operations.

use core::fmt;

use crate::layer::LayerKey;

/// Errors produced by layer construction and [`LayerTree`](crate::tree::LayerTree)
/// operations.
///
/// Node-level operations other than construction are total and never fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayerError {
    /// Neither a name nor a key was supplied, so no key can be derived.
    MissingIdentity,
    /// The tree contains no layer with this key.
    UnknownLayer(LayerKey),
    /// The tree already contains a layer with this key.
    DuplicateKey(LayerKey),
    /// The operation cannot be applied to the tree's root layer.
    RootLayer(LayerKey),
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingIdentity => f.write_str("layer needs a name or a key"),
            Self::UnknownLayer(key) => write!(f, "no layer with key `{key}`"),
            Self::DuplicateKey(key) => write!(f, "layer key `{key}` is already in the tree"),
            Self::RootLayer(key) => write!(f, "`{key}` is the root layer"),
        }
    }
}

impl core::error::Error for LayerError {}
