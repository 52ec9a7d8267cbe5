//! Input model: tools, modifier keys, mouse buttons, and instance UI state.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `UiState` is the per-editor interaction state (active tool,
//! selection, hover and edit focus) that the pointer pipeline reads and
//! updates.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::shape::ShapeId;

/// Active tool; decides what a primary press does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Click to select, Shift-click to extend.
    #[default]
    Select,
    /// Freehand stroke.
    Draw,
    Circle,
    Rect,
    Text,
    /// Pan the canvas by dragging.
    Hand,
    /// Delete shapes under the pointer.
    Eraser,
}

/// Modifier keys held when a pointer or wheel event fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    /// Command on macOS.
    pub meta: bool,
}

impl Modifiers {
    /// Shift extends the selection instead of replacing it.
    #[must_use]
    pub fn is_multi_select(self) -> bool {
        self.shift
    }

    /// Ctrl or Meta turns the wheel into zoom.
    #[must_use]
    pub fn is_zoom(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer button. Only `Primary` changes selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Button {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// Raw wheel deltas in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    pub dx: f64,
    /// Positive scrolls down.
    pub dy: f64,
}

/// Coarse selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    Single(ShapeId),
    /// More than one shape; carries the count.
    Multi(usize),
}

/// Per-editor interaction state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Selected shape ids. Always a subset of the editor's shapes.
    pub selected_ids: BTreeSet<ShapeId>,
    /// Shape under the pointer, if any.
    pub hovered_id: Option<ShapeId>,
    /// Shape with edit focus, if any.
    pub editing_id: Option<ShapeId>,
}

impl UiState {
    #[must_use]
    pub fn selection_state(&self) -> SelectionState {
        let mut ids = self.selected_ids.iter();
        match (ids.next(), ids.next()) {
            (None, _) => SelectionState::Empty,
            (Some(&id), None) => SelectionState::Single(id),
            (Some(_), Some(_)) => SelectionState::Multi(self.selected_ids.len()),
        }
    }

    /// Drop every reference to `id`. Returns true if anything changed.
    pub fn forget(&mut self, id: &ShapeId) -> bool {
        let mut changed = self.selected_ids.remove(id);
        if self.hovered_id.as_ref() == Some(id) {
            self.hovered_id = None;
            changed = true;
        }
        if self.editing_id.as_ref() == Some(id) {
            self.editing_id = None;
            changed = true;
        }
        changed
    }
}
