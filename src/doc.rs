//! Shape collection: the in-memory map of live shapes.
//!
//! `ShapeDoc` is the editor's source of truth. It knows nothing about pages,
//! selection or persistence; the editor layers those on top. Readers that need
//! paint order go through `sorted_shapes` or `shapes_on_page`, which order by
//! `(index, id)` so ties between equal keys are still deterministic.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use crate::shape::{PageId, Parent, Shape, ShapeError, ShapeId, ShapePatch};

/// In-memory store of shapes.
pub struct ShapeDoc {
    shapes: HashMap<ShapeId, Shape>,
}

impl ShapeDoc {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self { shapes: HashMap::new() }
    }

    /// Insert or replace a shape.
    pub fn insert(&mut self, shape: Shape) {
        self.shapes.insert(shape.id, shape);
    }

    /// Remove a shape by id, returning it if it was present.
    pub fn remove(&mut self, id: &ShapeId) -> Option<Shape> {
        self.shapes.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    /// Apply a sparse update. Returns `Ok(false)` if the shape doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the props patch does not decode; the shape is left
    /// unchanged.
    pub fn apply_patch(&mut self, id: &ShapeId, patch: &ShapePatch) -> Result<bool, ShapeError> {
        let Some(shape) = self.shapes.get_mut(id) else {
            return Ok(false);
        };
        shape.apply_patch(patch)?;
        Ok(true)
    }

    /// All shapes sorted by `(index, id)`.
    #[must_use]
    pub fn sorted_shapes(&self) -> Vec<&Shape> {
        let mut shapes: Vec<&Shape> = self.shapes.values().collect();
        shapes.sort_by(|a, b| paint_order(a, b));
        shapes
    }

    /// Shapes parented directly to `page_id`, in paint order.
    #[must_use]
    pub fn shapes_on_page(&self, page_id: PageId) -> Vec<&Shape> {
        self.children(Parent::Page(page_id))
    }

    /// Shapes sharing `parent`, in paint order.
    #[must_use]
    pub fn children(&self, parent: Parent) -> Vec<&Shape> {
        let mut shapes: Vec<&Shape> = self.shapes.values().filter(|s| s.parent_id == parent).collect();
        shapes.sort_by(|a, b| paint_order(a, b));
        shapes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Default for ShapeDoc {
    fn default() -> Self {
        Self::new()
    }
}

fn paint_order(a: &Shape, b: &Shape) -> std::cmp::Ordering {
    a.index.cmp(&b.index).then_with(|| a.id.cmp(&b.id))
}
