// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contracts for the rendering engine a layer tree drives.
//!
//! Drawing is not this crate's business. A layer only needs two things from
//! the engine:
//!
//! - **Renderable**: the drawable object behind a layer. The node pushes its
//!   visibility into it with [`Renderable::set_visible`] and never reads it
//!   back; the node's own flag is the single source of truth.
//!
//! - **Surface**: the map (or canvas) a renderable is registered on when a
//!   node is [attached](crate::layer::LayerNode::attach).
//!
//! Renderables are shared handles (`Rc<dyn Renderable>`): the engine owns
//! the drawable, and the node keeps a reference to it without managing its
//! lifecycle.

use alloc::rc::Rc;
use core::fmt;

/// An opaque identifier for a surface that renderables are registered on.
///
/// Surfaces assign their own ids; the core passes them through without
/// interpreting the value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SurfaceId(pub u32);

impl fmt::Debug for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceId({})", self.0)
    }
}

/// A drawable object owned by the rendering engine.
///
/// Takes `&self` because the handle is shared between the node and the
/// engine; implementors use interior mutability as needed.
pub trait Renderable {
    /// Shows or hides the drawable.
    ///
    /// Called exactly once per effective visibility change of the owning node,
    /// and once at node construction with the initial visibility.
    fn set_visible(&self, visible: bool);
}

/// The rendering surface (map) that an attached node registers into.
pub trait LayerSurface {
    /// Returns the id of this surface.
    fn id(&self) -> SurfaceId;

    /// Adds a drawable to this surface.
    fn add_renderable(&mut self, renderable: Rc<dyn Renderable>);
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording doubles for the render contracts.

    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::{LayerSurface, Renderable, SurfaceId};

    /// Records every visibility value pushed into it.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingRenderable {
        pub(crate) calls: RefCell<Vec<bool>>,
    }

    impl Renderable for RecordingRenderable {
        fn set_visible(&self, visible: bool) {
            self.calls.borrow_mut().push(visible);
        }
    }

    /// Counts registered renderables.
    #[derive(Default)]
    pub(crate) struct RecordingSurface {
        pub(crate) id: u32,
        pub(crate) added: Vec<Rc<dyn Renderable>>,
    }

    impl LayerSurface for RecordingSurface {
        fn id(&self) -> SurfaceId {
            SurfaceId(self.id)
        }

        fn add_renderable(&mut self, renderable: Rc<dyn Renderable>) {
            self.added.push(renderable);
        }
    }
}
