//! Editor core: owns the shape collection, the current page, instance state and
//! the camera, and exposes every mutation the host calls.
//!
//! DESIGN
//! ======
//! All operations are synchronous and take effect before they return. The
//! [`ShapeDoc`] is the source of truth; an optional [`RecordStore`] receives a
//! best-effort mirror of every write and its failures are logged, never
//! propagated. Behavior that differs per shape kind goes through the
//! [`ShapeUtilRegistry`]; the editor never matches on kind.
//!
//! Observers registered with [`Editor::subscribe`] receive a [`Changes`]
//! summary after each mutation. Inside [`Editor::batch`] the summaries are
//! merged and delivered once when the outermost batch returns.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::camera::Camera;
use crate::config::{ConfigError, EditorConfig, WheelBehavior};
use crate::doc::ShapeDoc;
use crate::geom::{Bounds, Point, union_boxes};
use crate::hit;
use crate::input::{Button, Modifiers, SelectionState, Tool, UiState, WheelDelta};
use crate::order::{self, IndexError};
use crate::render::RenderDescription;
use crate::shape::{Meta, Page, PageId, Parent, Shape, ShapeError, ShapeId, ShapeKind, ShapePatch, ShapeProps};
use crate::shapes::{DrawUtil, ResizeInfo, ShapeUtil, ShapeUtilRegistry};
use crate::store::{Record, RecordStore};

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("no shape util registered for {0}")]
    NoShapeUtil(ShapeKind),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Where a new shape goes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    /// Owning container; the current page when `None`.
    pub parent: Option<Parent>,
}

impl Placement {
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self { x, y, parent: None }
    }
}

/// Which parts of editor state a mutation touched.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    pub shapes: bool,
    pub selection: bool,
    pub camera: bool,
    /// Tool, hover or edit focus.
    pub instance: bool,
}

impl Changes {
    pub const SHAPES: Self = Self { shapes: true, selection: false, camera: false, instance: false };
    pub const SELECTION: Self = Self { shapes: false, selection: true, camera: false, instance: false };
    pub const CAMERA: Self = Self { shapes: false, selection: false, camera: true, instance: false };
    pub const INSTANCE: Self = Self { shapes: false, selection: false, camera: false, instance: true };

    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Self::default()
    }

    fn merge(&mut self, other: Self) {
        self.shapes |= other.shapes;
        self.selection |= other.selection;
        self.camera |= other.camera;
        self.instance |= other.instance;
    }
}

/// Handle returned by [`Editor::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&Changes)>;

/// Paint-ordered ids of the current page, tagged with the revision they were built from.
type PageShapesCache = Option<(u64, PageId, Rc<Vec<ShapeId>>)>;

pub struct Editor {
    config: EditorConfig,
    registry: ShapeUtilRegistry,
    store: Option<Box<dyn RecordStore>>,
    doc: ShapeDoc,
    page: Page,
    camera: Camera,
    ui: UiState,
    /// Bumped on every shape write; invalidates `page_shapes`.
    shapes_rev: u64,
    page_shapes: RefCell<PageShapesCache>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
    batch_depth: usize,
    pending: Changes,
}

impl Editor {
    /// Build an editor. When a store is given it is asked for the configured
    /// page first; a default page record is written only if none exists.
    /// The registry is used as given, so `config.draw_hit_margin` only
    /// reaches draw shapes through [`Editor::with_config`].
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`EditorConfig::validate`].
    pub fn new(
        config: EditorConfig,
        registry: ShapeUtilRegistry,
        store: Option<Box<dyn RecordStore>>,
    ) -> Result<Self, EditorError> {
        config.validate()?;
        Ok(Self::build(config, registry, store))
    }

    /// Built-in shape kinds, no store, draw hit margin taken from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`EditorConfig::validate`].
    pub fn with_config(config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        let mut registry = ShapeUtilRegistry::with_defaults(None);
        registry.register(Box::new(DrawUtil::new(config.draw_hit_margin)));
        Ok(Self::build(config, registry, None))
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::build(EditorConfig::default(), ShapeUtilRegistry::default(), None)
    }

    fn build(config: EditorConfig, registry: ShapeUtilRegistry, mut store: Option<Box<dyn RecordStore>>) -> Self {
        let page_id = config.initial_page_id.unwrap_or_else(Uuid::new_v4);
        let page = match store.as_deref_mut() {
            Some(store) => load_or_create_page(store, page_id, &config.initial_page_name),
            None => default_page(page_id, &config.initial_page_name),
        };
        info!(page_id = %page.id, page = %page.name, kinds = ?registry.kinds(), "editor ready");
        Self {
            config,
            registry,
            store,
            doc: ShapeDoc::new(),
            page,
            camera: Camera::default(),
            ui: UiState::default(),
            shapes_rev: 0,
            page_shapes: RefCell::new(None),
            observers: Vec::new(),
            next_observer: 0,
            batch_depth: 0,
            pending: Changes::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &ShapeUtilRegistry {
        &self.registry
    }

    // =========================================================================
    // SHAPES
    // =========================================================================

    /// Create a shape of `kind` with `partial` props merged over the kind's
    /// defaults. `partial` may be `Value::Null` for pure defaults. The shape is
    /// placed above its siblings.
    ///
    /// # Errors
    ///
    /// Returns an error if no util is registered for `kind` or the props do
    /// not decode.
    pub fn create_shape(
        &mut self,
        kind: ShapeKind,
        partial: &serde_json::Value,
        placement: Placement,
    ) -> Result<Shape, EditorError> {
        let util = self.registry.get(kind).ok_or(EditorError::NoShapeUtil(kind))?;
        let defaults = util.default_props();
        let props = if partial.is_null() { defaults } else { ShapeProps::merged(&defaults, partial, &defaults)? };

        let parent = placement.parent.unwrap_or(Parent::Page(self.page.id));
        let index = match self.doc.children(parent).last() {
            Some(top) => order::key_after(&top.index)?,
            None => order::first_key(),
        };

        let mut shape = Shape::new(Uuid::new_v4(), parent, index, props);
        shape.x = placement.x;
        shape.y = placement.y;

        debug!(id = %shape.id, %kind, index = %shape.index, "shape created");
        self.doc.insert(shape.clone());
        self.mirror_put(Record::Shape(shape.clone()));
        self.touch_shapes();
        Ok(shape)
    }

    /// Merge `patch` into an existing shape. Opacity is clamped to `[0, 1]`
    /// and a non-finite opacity is dropped from the patch.
    /// Returns `Ok(false)` and logs when `id` is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the props patch does not decode; the shape is left
    /// unchanged.
    pub fn update_shape(&mut self, id: &ShapeId, patch: &ShapePatch) -> Result<bool, EditorError> {
        let mut patch = patch.clone();
        patch.opacity = match patch.opacity {
            Some(o) if !o.is_finite() => {
                warn!(%id, opacity = o, "update_shape: ignoring non-finite opacity");
                None
            }
            other => other.map(|o| o.clamp(0.0, 1.0)),
        };

        if !self.doc.apply_patch(id, &patch)? {
            warn!(%id, "update_shape: unknown shape");
            return Ok(false);
        }
        if let Some(shape) = self.doc.get(id) {
            let record = Record::Shape(shape.clone());
            self.mirror_put(record);
        }
        self.touch_shapes();
        Ok(true)
    }

    /// Remove a shape and every reference the instance state holds to it.
    /// Returns false and logs when `id` is unknown.
    pub fn delete_shape(&mut self, id: &ShapeId) -> bool {
        self.delete_shapes(std::slice::from_ref(id)) == 1
    }

    /// Remove several shapes, returning how many existed.
    pub fn delete_shapes(&mut self, ids: &[ShapeId]) -> usize {
        let mut removed = Vec::with_capacity(ids.len());
        let mut changes = Changes::SHAPES;
        for id in ids {
            let Some(shape) = self.doc.remove(id) else {
                warn!(%id, "delete_shape: unknown shape");
                continue;
            };
            if self.ui.editing_id == Some(*id) {
                if let Some(util) = self.registry.for_shape(&shape) {
                    util.on_edit_end(&shape);
                }
            }
            changes.selection |= self.ui.selected_ids.contains(id);
            changes.instance |= self.ui.hovered_id == Some(*id) || self.ui.editing_id == Some(*id);
            self.ui.forget(id);
            removed.push(*id);
        }
        if removed.is_empty() {
            return 0;
        }

        if let Some(store) = self.store.as_mut() {
            if let Err(e) = store.remove(&removed) {
                warn!(error = %e, count = removed.len(), "store remove failed");
            }
        }
        self.shapes_rev += 1;
        self.pending_or_notify(changes);
        removed.len()
    }

    #[must_use]
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.doc.get(id)
    }

    /// Every shape in the collection, across pages, in paint order.
    #[must_use]
    pub fn all_shapes(&self) -> Vec<&Shape> {
        self.doc.sorted_shapes()
    }

    /// Move a shape above its siblings. Returns `Ok(false)` if it was already on top or is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if a sibling carries a malformed order key.
    pub fn bring_to_front(&mut self, id: &ShapeId) -> Result<bool, EditorError> {
        let Some(shape) = self.doc.get(id) else {
            warn!(%id, "bring_to_front: unknown shape");
            return Ok(false);
        };
        let siblings = self.doc.children(shape.parent_id);
        let Some(top) = siblings.last() else {
            return Ok(false);
        };
        if top.id == *id {
            return Ok(false);
        }
        let index = order::key_after(&top.index)?;
        self.update_shape(id, &ShapePatch { index: Some(index), ..Default::default() })
    }

    /// Move a shape below its siblings. Returns `Ok(false)` if it was already at the bottom or is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if a sibling carries a malformed order key.
    pub fn send_to_back(&mut self, id: &ShapeId) -> Result<bool, EditorError> {
        let Some(shape) = self.doc.get(id) else {
            warn!(%id, "send_to_back: unknown shape");
            return Ok(false);
        };
        let siblings = self.doc.children(shape.parent_id);
        let Some(bottom) = siblings.first() else {
            return Ok(false);
        };
        if bottom.id == *id {
            return Ok(false);
        }
        let index = order::key_before(&bottom.index)?;
        self.update_shape(id, &ShapePatch { index: Some(index), ..Default::default() })
    }

    /// Apply the kind's resize response. Returns `Ok(false)` when the shape is
    /// unknown or cannot be resized.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting patch does not apply.
    pub fn resize_shape(&mut self, id: &ShapeId, info: &ResizeInfo) -> Result<bool, EditorError> {
        let Some((shape, util)) = self.shape_and_util(id) else {
            return Ok(false);
        };
        if !util.can_resize(shape) {
            debug!(%id, "resize refused");
            return Ok(false);
        }
        let patch = util.on_resize(shape, info);
        if patch.is_empty() {
            return Ok(false);
        }
        self.update_shape(id, &patch)
    }

    /// Apply the kind's rotate response with `rotation` in radians.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting patch does not apply.
    pub fn rotate_shape(&mut self, id: &ShapeId, rotation: f64) -> Result<bool, EditorError> {
        let Some((shape, util)) = self.shape_and_util(id) else {
            return Ok(false);
        };
        if !util.can_rotate(shape) {
            debug!(%id, "rotate refused");
            return Ok(false);
        }
        let patch = util.on_rotate(shape, rotation);
        if patch.is_empty() {
            return Ok(false);
        }
        self.update_shape(id, &patch)
    }

    // =========================================================================
    // VIEWS
    // =========================================================================

    /// Shapes parented directly to the current page, in paint order.
    #[must_use]
    pub fn current_page_shapes(&self) -> Vec<&Shape> {
        self.current_page_ids().iter().filter_map(|id| self.doc.get(id)).collect()
    }

    /// Current-page shapes that are selected, in paint order.
    #[must_use]
    pub fn selected_shapes(&self) -> Vec<&Shape> {
        self.current_page_ids()
            .iter()
            .filter(|id| self.ui.selected_ids.contains(id))
            .filter_map(|id| self.doc.get(id))
            .collect()
    }

    #[must_use]
    pub fn current_page(&self) -> &Page {
        &self.page
    }

    /// Union of the selected shapes' bounds, or `None` with nothing selected.
    #[must_use]
    pub fn selection_bounds(&self) -> Option<Bounds> {
        let boxes = self.bounds_of(&self.selected_shapes());
        if boxes.is_empty() { None } else { Some(union_boxes(&boxes)) }
    }

    /// Render descriptions for the current page, bottom first.
    #[must_use]
    pub fn render_list(&self) -> Vec<RenderDescription> {
        self.current_page_shapes()
            .into_iter()
            .filter_map(|shape| self.registry.for_shape(shape).and_then(|util| util.render(shape)))
            .collect()
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    #[must_use]
    pub fn selected_ids(&self) -> &BTreeSet<ShapeId> {
        &self.ui.selected_ids
    }

    #[must_use]
    pub fn selection_state(&self) -> SelectionState {
        self.ui.selection_state()
    }

    #[must_use]
    pub fn is_selected(&self, id: &ShapeId) -> bool {
        self.ui.selected_ids.contains(id)
    }

    /// Replace the selection with `id`.
    pub fn select_shape(&mut self, id: &ShapeId) -> bool {
        if !self.doc.contains(id) {
            warn!(%id, "select_shape: unknown shape");
            return false;
        }
        if self.ui.selected_ids.len() == 1 && self.ui.selected_ids.contains(id) {
            return true;
        }
        self.ui.selected_ids.clear();
        self.ui.selected_ids.insert(*id);
        self.pending_or_notify(Changes::SELECTION);
        true
    }

    pub fn add_to_selection(&mut self, id: &ShapeId) -> bool {
        if !self.doc.contains(id) {
            warn!(%id, "add_to_selection: unknown shape");
            return false;
        }
        if self.ui.selected_ids.insert(*id) {
            self.pending_or_notify(Changes::SELECTION);
        }
        true
    }

    pub fn remove_from_selection(&mut self, id: &ShapeId) -> bool {
        let removed = self.ui.selected_ids.remove(id);
        if removed {
            self.pending_or_notify(Changes::SELECTION);
        }
        removed
    }

    /// Select every shape on the current page.
    pub fn select_all(&mut self) {
        let ids: BTreeSet<ShapeId> = self.current_page_ids().iter().copied().collect();
        if ids != self.ui.selected_ids {
            self.ui.selected_ids = ids;
            self.pending_or_notify(Changes::SELECTION);
        }
    }

    pub fn clear_selection(&mut self) {
        if !self.ui.selected_ids.is_empty() {
            self.ui.selected_ids.clear();
            self.pending_or_notify(Changes::SELECTION);
        }
    }

    // =========================================================================
    // CAMERA
    // =========================================================================

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Set pan and zoom; zoom is clamped, pan is not. A camera with a
    /// non-finite component is ignored.
    pub fn set_camera(&mut self, camera: Camera) {
        if !(camera.x.is_finite() && camera.y.is_finite() && camera.z.is_finite()) {
            warn!(x = camera.x, y = camera.y, z = camera.z, "set_camera: ignoring non-finite camera");
            return;
        }
        let camera = Camera { z: self.config.clamp_zoom(camera.z), ..camera };
        if camera != self.camera {
            debug!(x = camera.x, y = camera.y, z = camera.z, "camera moved");
            self.camera = camera;
            self.pending_or_notify(Changes::CAMERA);
        }
    }

    pub fn zoom_in(&mut self) {
        let z = self.camera.z * self.config.zoom_step;
        self.set_camera(Camera { z, ..self.camera });
    }

    pub fn zoom_out(&mut self) {
        let z = self.camera.z / self.config.zoom_step;
        self.set_camera(Camera { z, ..self.camera });
    }

    pub fn reset_camera(&mut self) {
        self.set_camera(Camera::default());
    }

    /// Fit the current page's shapes into a viewport, leaving `padding` device
    /// pixels on each side. Does nothing on an empty page.
    pub fn zoom_to_fit(&mut self, viewport_width: f64, viewport_height: f64, padding: f64) {
        let boxes = self.bounds_of(&self.current_page_shapes());
        if boxes.is_empty() {
            return;
        }
        let bounds = union_boxes(&boxes);
        let avail_w = (viewport_width - 2.0 * padding).max(1.0);
        let avail_h = (viewport_height - 2.0 * padding).max(1.0);
        let fit_w = if bounds.width > 0.0 { avail_w / bounds.width } else { f64::INFINITY };
        let fit_h = if bounds.height > 0.0 { avail_h / bounds.height } else { f64::INFINITY };
        let z = self.config.clamp_zoom(fit_w.min(fit_h));

        let center = bounds.center();
        self.set_camera(Camera { x: viewport_width / 2.0 - center.x * z, y: viewport_height / 2.0 - center.y * z, z });
    }

    // =========================================================================
    // INSTANCE STATE
    // =========================================================================

    #[must_use]
    pub fn current_tool(&self) -> Tool {
        self.ui.tool
    }

    pub fn set_current_tool(&mut self, tool: Tool) {
        if self.ui.tool != tool {
            debug!(?tool, "tool changed");
            self.ui.tool = tool;
            self.pending_or_notify(Changes::INSTANCE);
        }
    }

    #[must_use]
    pub fn hovered_shape(&self) -> Option<ShapeId> {
        self.ui.hovered_id
    }

    pub fn set_hovered_shape(&mut self, id: Option<ShapeId>) {
        let id = id.filter(|id| self.doc.contains(id));
        if self.ui.hovered_id != id {
            self.ui.hovered_id = id;
            self.pending_or_notify(Changes::INSTANCE);
        }
    }

    #[must_use]
    pub fn editing_shape(&self) -> Option<ShapeId> {
        self.ui.editing_id
    }

    /// Move edit focus, running the end hook of the previous shape and the
    /// start hook of the new one. Returns false if `id` is unknown or not
    /// editable; focus is unchanged in that case.
    pub fn set_editing_shape(&mut self, id: Option<ShapeId>) -> bool {
        if id == self.ui.editing_id {
            return true;
        }
        if let Some(next) = id {
            match self.shape_and_util(&next) {
                Some((shape, util)) if util.can_edit(shape) => {}
                Some(_) => {
                    debug!(id = %next, "shape is not editable");
                    return false;
                }
                None => {
                    warn!(id = %next, "set_editing_shape: unknown shape");
                    return false;
                }
            }
        }

        if let Some(prev) = self.ui.editing_id {
            if let Some((shape, util)) = self.shape_and_util(&prev) {
                util.on_edit_end(shape);
            }
        }
        self.ui.editing_id = id;
        if let Some(next) = id {
            if let Some((shape, util)) = self.shape_and_util(&next) {
                util.on_edit_start(shape);
            }
        }
        self.pending_or_notify(Changes::INSTANCE);
        true
    }

    // =========================================================================
    // POINTER PIPELINE
    // =========================================================================

    /// Topmost current-page shape under a device-space point.
    #[must_use]
    pub fn shape_at(&self, screen_pt: Point) -> Option<ShapeId> {
        let world = self.camera.screen_to_world(screen_pt);
        hit::hit_test(world, &self.current_page_shapes(), &self.registry)
    }

    /// Resolve a press. With the select tool a miss clears the selection
    /// (unless Shift is held) and ends editing; a hit adds with Shift or
    /// replaces an unselected selection. The eraser deletes what it hits.
    /// Returns the hit shape.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Option<ShapeId> {
        let hit = self.shape_at(screen_pt);
        if button != Button::Primary {
            return hit;
        }

        match self.ui.tool {
            Tool::Hand => {}
            Tool::Eraser => {
                if let Some(id) = hit {
                    self.delete_shape(&id);
                }
            }
            _ => self.batch(|editor| editor.apply_press(hit, modifiers)),
        }
        hit
    }

    /// Update hover from a pointer position.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Option<ShapeId> {
        let hit = self.shape_at(screen_pt);
        self.set_hovered_shape(hit);
        hit
    }

    /// Enter edit mode on the shape under the pointer if its kind accepts it.
    pub fn on_double_click(&mut self, screen_pt: Point) -> bool {
        let Some(id) = self.shape_at(screen_pt) else {
            return false;
        };
        let accepts = self.shape_and_util(&id).is_some_and(|(shape, util)| util.on_double_click(shape));
        accepts && self.set_editing_shape(Some(id))
    }

    /// Zoom with Ctrl/Meta, otherwise pan by the raw deltas, per the
    /// configured wheel behavior.
    pub fn on_wheel(&mut self, delta: WheelDelta, modifiers: Modifiers) {
        let zoom = match self.config.wheel_behavior {
            WheelBehavior::None => return,
            WheelBehavior::Zoom => modifiers.is_zoom(),
            WheelBehavior::Pan => false,
        };
        let camera = self.camera;
        if zoom {
            let z = camera.z * (1.0 + self.config.wheel_zoom_speed * -delta.dy);
            self.set_camera(Camera { z, ..camera });
        } else {
            self.set_camera(Camera { x: camera.x - delta.dx, y: camera.y - delta.dy, ..camera });
        }
    }

    fn apply_press(&mut self, hit: Option<ShapeId>, modifiers: Modifiers) {
        match hit {
            Some(id) if modifiers.is_multi_select() => {
                self.add_to_selection(&id);
            }
            Some(id) => {
                if !self.is_selected(&id) {
                    self.select_shape(&id);
                }
                if self.ui.editing_id.is_some_and(|editing| editing != id) {
                    self.set_editing_shape(None);
                }
            }
            None => {
                if !modifiers.is_multi_select() {
                    self.clear_selection();
                }
                self.set_editing_shape(None);
            }
        }
    }

    // =========================================================================
    // OBSERVERS
    // =========================================================================

    /// Register `callback` to run after every change.
    pub fn subscribe(&mut self, callback: Box<dyn FnMut(&Changes)>) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, callback));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    /// Run `f` with notifications held until the outermost batch returns.
    /// Nothing is rolled back if `f` fails partway.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.batch_depth += 1;
        let out = f(self);
        self.batch_depth -= 1;
        if self.batch_depth == 0 {
            self.flush();
        }
        out
    }

    fn pending_or_notify(&mut self, changes: Changes) {
        self.pending.merge(changes);
        if self.batch_depth == 0 {
            self.flush();
        }
    }

    fn flush(&mut self) {
        let changes = std::mem::take(&mut self.pending);
        if changes.is_empty() {
            return;
        }
        for (_, observer) in &mut self.observers {
            observer(&changes);
        }
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn touch_shapes(&mut self) {
        self.shapes_rev += 1;
        self.pending_or_notify(Changes::SHAPES);
    }

    fn current_page_ids(&self) -> Rc<Vec<ShapeId>> {
        if let Some((rev, page, ids)) = self.page_shapes.borrow().as_ref() {
            if *rev == self.shapes_rev && *page == self.page.id {
                return Rc::clone(ids);
            }
        }
        let ids: Rc<Vec<ShapeId>> = Rc::new(self.doc.shapes_on_page(self.page.id).iter().map(|s| s.id).collect());
        *self.page_shapes.borrow_mut() = Some((self.shapes_rev, self.page.id, Rc::clone(&ids)));
        ids
    }

    fn shape_and_util(&self, id: &ShapeId) -> Option<(&Shape, &dyn ShapeUtil)> {
        let shape = self.doc.get(id)?;
        let util = self.registry.for_shape(shape)?;
        Some((shape, util))
    }

    fn bounds_of(&self, shapes: &[&Shape]) -> Vec<Bounds> {
        shapes
            .iter()
            .filter_map(|shape| self.registry.for_shape(shape).map(|util| util.bounds(shape)))
            .collect()
    }

    fn mirror_put(&mut self, record: Record) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        let id = record.id();
        if let Err(e) = store.put(std::slice::from_ref(&record)) {
            warn!(error = %e, %id, "store put failed");
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn default_page(id: PageId, name: &str) -> Page {
    Page { id, name: name.to_string(), index: order::first_key(), meta: Meta::new() }
}

fn load_or_create_page(store: &mut dyn RecordStore, id: PageId, name: &str) -> Page {
    match store.get(&id) {
        Ok(Some(Record::Page(page))) => return page,
        Ok(Some(Record::Shape(_))) => warn!(%id, "initial page id names a shape record"),
        Ok(None) => {}
        Err(e) => warn!(error = %e, %id, "store get failed"),
    }
    let page = default_page(id, name);
    if let Err(e) = store.put(&[Record::Page(page.clone())]) {
        warn!(error = %e, %id, "store put failed");
    }
    page
}
