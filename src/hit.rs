#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::Point;
use crate::shape::{Shape, ShapeId};
use crate::shapes::ShapeUtilRegistry;

/// Topmost shape under `world_pt`.
///
/// `shapes` must be in paint order (bottom first); the scan runs in reverse so
/// the first match is the one drawn on top. Locked shapes and shapes without a
/// registered capability are transparent.
#[must_use]
pub fn hit_test(world_pt: Point, shapes: &[&Shape], registry: &ShapeUtilRegistry) -> Option<ShapeId> {
    shapes
        .iter()
        .rev()
        .filter(|s| !s.is_locked)
        .find(|s| registry.for_shape(s).is_some_and(|util| util.hit_test(s, world_pt)))
        .map(|s| s.id)
}
