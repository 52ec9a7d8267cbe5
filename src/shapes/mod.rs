//! Shape capabilities: per-kind geometry and behavior behind one trait.
//!
//! DESIGN
//! ======
//! Every shape kind has exactly one [`ShapeUtil`] implementation answering
//! bounds, hit-test, render and gesture questions for shapes of that kind.
//! [`ShapeUtilRegistry`] resolves a [`ShapeKind`] to its implementation with a
//! direct map lookup. New kinds register an implementation; the registry and
//! the editor never branch on kind themselves.
//!
//! Bounds are axis-aligned in page space and ignore rotation. Gesture hooks
//! return [`ShapePatch`] values the editor applies through its normal update
//! path instead of mutating shapes directly.

pub mod circle;
pub mod draw;
pub mod rect;
pub mod text;

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geom::{Bounds, Point};
use crate::metrics::TextMetrics;
use crate::render::RenderDescription;
use crate::shape::{Shape, ShapeKind, ShapePatch, ShapeProps};

pub use circle::CircleUtil;
pub use draw::DrawUtil;
pub use rect::RectUtil;
pub use text::TextUtil;

// =============================================================================
// RESIZE TYPES
// =============================================================================

/// Handle on the selection frame a resize gesture drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Right,
    Bottom,
    Left,
}

impl ResizeHandle {
    /// Four corners, then four edges.
    pub const ALL: [ResizeHandle; 8] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
        Self::Top,
        Self::Right,
        Self::Bottom,
        Self::Left,
    ];

    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight)
    }
}

/// Outcome of a resize drag, expressed as the target frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeInfo {
    /// Target frame in page space.
    pub bounds: Bounds,
    /// Horizontal scale relative to the frame at gesture start.
    pub scale_x: f64,
    /// Vertical scale relative to the frame at gesture start.
    pub scale_y: f64,
    pub handle: ResizeHandle,
    pub is_aspect_ratio_locked: bool,
}

impl ResizeInfo {
    /// Unlocked resize to `bounds` from the bottom-right handle.
    #[must_use]
    pub fn unlocked(bounds: Bounds, scale_x: f64, scale_y: f64) -> Self {
        Self { bounds, scale_x, scale_y, handle: ResizeHandle::BottomRight, is_aspect_ratio_locked: false }
    }
}

// =============================================================================
// CAPABILITY CONTRACT
// =============================================================================

/// Geometry and behavior for one shape kind.
///
/// Methods receive shapes of the implementation's own kind; given another kind
/// they return neutral answers (zero bounds, no hit, no render).
pub trait ShapeUtil {
    fn kind(&self) -> ShapeKind;

    /// Props used for fields omitted at creation.
    fn default_props(&self) -> ShapeProps;

    /// Axis-aligned bounds in page space, ignoring rotation.
    fn bounds(&self, shape: &Shape) -> Bounds;

    /// Whether `point` (page space) lies on the shape.
    fn hit_test(&self, shape: &Shape, point: Point) -> bool;

    /// Render description, or `None` when there is nothing to draw.
    fn render(&self, shape: &Shape) -> Option<RenderDescription>;

    fn center(&self, shape: &Shape) -> Point {
        self.bounds(shape).center()
    }

    fn can_edit(&self, _shape: &Shape) -> bool {
        false
    }

    fn can_resize(&self, _shape: &Shape) -> bool {
        true
    }

    fn can_rotate(&self, _shape: &Shape) -> bool {
        true
    }

    fn can_bind(&self, _shape: &Shape) -> bool {
        false
    }

    fn resize_handles(&self, _shape: &Shape) -> &'static [ResizeHandle] {
        &ResizeHandle::ALL
    }

    /// Patch for a resize gesture. The default only moves the origin.
    fn on_resize(&self, _shape: &Shape, info: &ResizeInfo) -> ShapePatch {
        ShapePatch::position(info.bounds.x, info.bounds.y)
    }

    /// Patch for a rotate gesture to an absolute `rotation` in radians.
    fn on_rotate(&self, _shape: &Shape, rotation: f64) -> ShapePatch {
        ShapePatch { rotation: Some(rotation), ..Default::default() }
    }

    /// Whether a double-click on the shape should enter edit mode.
    fn on_double_click(&self, shape: &Shape) -> bool {
        self.can_edit(shape)
    }

    fn on_edit_start(&self, _shape: &Shape) {}

    fn on_edit_end(&self, _shape: &Shape) {}
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Maps each shape kind to its capability implementation.
pub struct ShapeUtilRegistry {
    utils: HashMap<ShapeKind, Box<dyn ShapeUtil>>,
}

impl ShapeUtilRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { utils: HashMap::new() }
    }

    /// A registry with the four built-in kinds. `metrics` measures auto-sized text.
    #[must_use]
    pub fn with_defaults(metrics: Option<Box<dyn TextMetrics>>) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(CircleUtil));
        registry.register(Box::new(RectUtil));
        registry.register(Box::new(TextUtil::new(metrics)));
        registry.register(Box::new(DrawUtil::default()));
        registry
    }

    /// Register `util` for its kind, replacing any previous implementation.
    pub fn register(&mut self, util: Box<dyn ShapeUtil>) {
        self.utils.insert(util.kind(), util);
    }

    #[must_use]
    pub fn get(&self, kind: ShapeKind) -> Option<&dyn ShapeUtil> {
        self.utils.get(&kind).map(Box::as_ref)
    }

    /// Implementation for `shape`'s kind.
    #[must_use]
    pub fn for_shape(&self, shape: &Shape) -> Option<&dyn ShapeUtil> {
        self.get(shape.kind())
    }

    #[must_use]
    pub fn has(&self, kind: ShapeKind) -> bool {
        self.utils.contains_key(&kind)
    }

    /// Registered kinds in a stable order.
    #[must_use]
    pub fn kinds(&self) -> Vec<ShapeKind> {
        let mut kinds: Vec<ShapeKind> = self.utils.keys().copied().collect();
        kinds.sort();
        kinds
    }
}

impl Default for ShapeUtilRegistry {
    fn default() -> Self {
        Self::with_defaults(None)
    }
}
