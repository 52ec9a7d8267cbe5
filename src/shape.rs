//! Shape model: the tagged-variant records that describe what is on a page.
//!
//! A [`Shape`] carries the fields common to every drawable (position,
//! rotation, paint-order key, opacity, lock flag, metadata) plus a typed
//! [`ShapeProps`] payload selected by its [`ShapeKind`]. On the wire a shape is
//! a flat object with a `type` tag and a `props` object.
//!
//! Edits flow through [`ShapePatch`], a sparse update where only present
//! fields are applied. Props are patched key by key as JSON so callers can
//! change one field (say `fill`) without restating the rest; a `null` value
//! resets that key to the variant default.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::Point;

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

/// Unique identifier for a page.
pub type PageId = Uuid;

/// Arbitrary host-owned metadata attached to shapes and pages.
pub type Meta = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("unknown shape type: {0}")]
    UnknownType(String),
    #[error("{kind} props must be a JSON object")]
    NotAnObject { kind: ShapeKind },
    #[error("invalid {kind} props: {source}")]
    InvalidProps {
        kind: ShapeKind,
        #[source]
        source: serde_json::Error,
    },
}

// =============================================================
// Kinds and parents
// =============================================================

/// The type tag of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Circle centered on the shape origin.
    Circle,
    /// Rectangle with its top-left corner at the shape origin.
    Rect,
    /// Single-line text anchored at its top-left corner.
    Text,
    /// Freehand stroke whose points live in page space.
    Draw,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [Self::Circle, Self::Rect, Self::Text, Self::Draw];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Rect => "rect",
            Self::Text => "text",
            Self::Draw => "draw",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ShapeError::UnknownType(s.to_string()))
    }
}

/// The container a shape belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Parent {
    Page(PageId),
    Shape(ShapeId),
}

impl Parent {
    /// The page id, if the parent is a page.
    #[must_use]
    pub fn page(self) -> Option<PageId> {
        match self {
            Self::Page(id) => Some(id),
            Self::Shape(_) => None,
        }
    }
}

// =============================================================
// Props
// =============================================================

const DEFAULT_FILL: &str = "#e3e3e3";
const DEFAULT_INK: &str = "#1e1e1e";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CircleProps {
    pub radius: f64,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

impl Default for CircleProps {
    fn default() -> Self {
        Self { radius: 50.0, fill: DEFAULT_FILL.into(), stroke: DEFAULT_INK.into(), stroke_width: 2.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RectProps {
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub corner_radius: f64,
}

impl Default for RectProps {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            fill: DEFAULT_FILL.into(),
            stroke: DEFAULT_INK.into(),
            stroke_width: 2.0,
            corner_radius: 0.0,
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextProps {
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
    pub color: String,
    pub align: TextAlign,
    /// Size the box from measured text instead of the fixed fallback box.
    pub auto_size: bool,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: 16.0,
            font_family: "sans-serif".into(),
            color: DEFAULT_INK.into(),
            align: TextAlign::Left,
            auto_size: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DrawProps {
    /// Stroke points in page space, not relative to the shape origin.
    pub points: Vec<Point>,
    pub color: String,
    /// Stroke width.
    pub size: f64,
    pub is_closed: bool,
}

impl Default for DrawProps {
    fn default() -> Self {
        Self { points: Vec::new(), color: DEFAULT_INK.into(), size: 2.0, is_closed: false }
    }
}

/// Type-specific payload of a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeProps {
    Circle(CircleProps),
    Rect(RectProps),
    Text(TextProps),
    Draw(DrawProps),
}

impl ShapeProps {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Circle(_) => ShapeKind::Circle,
            Self::Rect(_) => ShapeKind::Rect,
            Self::Text(_) => ShapeKind::Text,
            Self::Draw(_) => ShapeKind::Draw,
        }
    }

    /// Built-in defaults for `kind`.
    #[must_use]
    pub fn default_for(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Circle => Self::Circle(CircleProps::default()),
            ShapeKind::Rect => Self::Rect(RectProps::default()),
            ShapeKind::Text => Self::Text(TextProps::default()),
            ShapeKind::Draw => Self::Draw(DrawProps::default()),
        }
    }

    /// Decode a props object for `kind`. Missing fields take built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not an object or a field has the wrong type.
    pub fn from_value(kind: ShapeKind, value: serde_json::Value) -> Result<Self, ShapeError> {
        if !value.is_object() {
            return Err(ShapeError::NotAnObject { kind });
        }
        let invalid = |source| ShapeError::InvalidProps { kind, source };
        Ok(match kind {
            ShapeKind::Circle => Self::Circle(serde_json::from_value(value).map_err(invalid)?),
            ShapeKind::Rect => Self::Rect(serde_json::from_value(value).map_err(invalid)?),
            ShapeKind::Text => Self::Text(serde_json::from_value(value).map_err(invalid)?),
            ShapeKind::Draw => Self::Draw(serde_json::from_value(value).map_err(invalid)?),
        })
    }

    /// Encode as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        let encoded = match self {
            Self::Circle(p) => serde_json::to_value(p),
            Self::Rect(p) => serde_json::to_value(p),
            Self::Text(p) => serde_json::to_value(p),
            Self::Draw(p) => serde_json::to_value(p),
        };
        // Props are plain structs of numbers, strings and bools; encoding cannot fail.
        encoded.unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()))
    }

    /// Merge `partial` key by key over `base` and decode the result.
    ///
    /// A `null` in `partial` takes the key's value from `defaults` (or drops it,
    /// leaving the built-in default, when `defaults` lacks the key).
    ///
    /// # Errors
    ///
    /// Returns an error if `partial` is not an object or the merged payload does not decode.
    pub fn merged(base: &Self, partial: &serde_json::Value, defaults: &Self) -> Result<Self, ShapeError> {
        let kind = base.kind();
        let Some(incoming) = partial.as_object() else {
            return Err(ShapeError::NotAnObject { kind });
        };

        let mut merged = base.to_value();
        let fallback = defaults.to_value();
        if let Some(existing) = merged.as_object_mut() {
            for (k, v) in incoming {
                if v.is_null() {
                    if let Some(d) = fallback.get(k) {
                        existing.insert(k.clone(), d.clone());
                    } else {
                        existing.remove(k);
                    }
                } else {
                    existing.insert(k.clone(), v.clone());
                }
            }
        }
        Self::from_value(kind, merged)
    }

    #[must_use]
    pub fn as_circle(&self) -> Option<&CircleProps> {
        match self {
            Self::Circle(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_rect(&self) -> Option<&RectProps> {
        match self {
            Self::Rect(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&TextProps> {
        match self {
            Self::Text(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_draw(&self) -> Option<&DrawProps> {
        match self {
            Self::Draw(p) => Some(p),
            _ => None,
        }
    }
}

// =============================================================
// Shape
// =============================================================

/// A shape as stored in the editor and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ShapeRecord", into = "ShapeRecord")]
pub struct Shape {
    /// Unique identifier for this shape.
    pub id: ShapeId,
    /// Page or shape that owns this shape.
    pub parent_id: Parent,
    /// Local origin in page space. Meaning depends on the kind (center for circles).
    pub x: f64,
    pub y: f64,
    /// Rotation in radians. Stored as given, never normalized.
    pub rotation: f64,
    /// Paint-order key; higher keys paint above lower keys.
    pub index: String,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Locked shapes ignore pointer hit-testing.
    pub is_locked: bool,
    pub meta: Meta,
    pub props: ShapeProps,
}

impl Shape {
    /// A shape at the origin with neutral common fields.
    #[must_use]
    pub fn new(id: ShapeId, parent_id: Parent, index: String, props: ShapeProps) -> Self {
        Self {
            id,
            parent_id,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            index,
            opacity: 1.0,
            is_locked: false,
            meta: Meta::new(),
            props,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.props.kind()
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Apply a sparse update. Props are decoded before any field is written, so
    /// a failed patch leaves the shape untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the props patch does not decode for this shape's kind.
    pub fn apply_patch(&mut self, patch: &ShapePatch) -> Result<(), ShapeError> {
        let props = match &patch.props {
            Some(partial) => Some(ShapeProps::merged(&self.props, partial, &ShapeProps::default_for(self.kind()))?),
            None => None,
        };

        if let Some(parent) = patch.parent_id {
            self.parent_id = parent;
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(r) = patch.rotation {
            self.rotation = r;
        }
        if let Some(ref index) = patch.index {
            self.index.clone_from(index);
        }
        if let Some(o) = patch.opacity {
            self.opacity = o;
        }
        if let Some(locked) = patch.is_locked {
            self.is_locked = locked;
        }
        if let Some(ref meta) = patch.meta {
            self.meta.clone_from(meta);
        }
        if let Some(props) = props {
            self.props = props;
        }
        Ok(())
    }
}

/// Wire form of [`Shape`]: flat common fields, a `type` tag and a `props` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShapeRecord {
    id: ShapeId,
    #[serde(rename = "type")]
    kind: ShapeKind,
    parent_id: Parent,
    x: f64,
    y: f64,
    #[serde(default)]
    rotation: f64,
    index: String,
    #[serde(default = "full_opacity")]
    opacity: f64,
    #[serde(default)]
    is_locked: bool,
    #[serde(default)]
    meta: Meta,
    #[serde(default = "empty_object")]
    props: serde_json::Value,
}

fn full_opacity() -> f64 {
    1.0
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl TryFrom<ShapeRecord> for Shape {
    type Error = ShapeError;

    fn try_from(r: ShapeRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            parent_id: r.parent_id,
            x: r.x,
            y: r.y,
            rotation: r.rotation,
            index: r.index,
            opacity: r.opacity,
            is_locked: r.is_locked,
            meta: r.meta,
            props: ShapeProps::from_value(r.kind, r.props)?,
        })
    }
}

impl From<Shape> for ShapeRecord {
    fn from(s: Shape) -> Self {
        Self {
            id: s.id,
            kind: s.kind(),
            parent_id: s.parent_id,
            x: s.x,
            y: s.y,
            rotation: s.rotation,
            index: s.index,
            opacity: s.opacity,
            is_locked: s.is_locked,
            meta: s.meta,
            props: s.props.to_value(),
        }
    }
}

/// Sparse update for a shape. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Parent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New rotation in radians.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
    /// Replaces the whole metadata map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    /// Props keys to merge (null values reset keys to their defaults).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<serde_json::Value>,
}

impl ShapePatch {
    /// Patch that only moves the origin.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    /// Patch that only touches props.
    #[must_use]
    pub fn props(props: serde_json::Value) -> Self {
        Self { props: Some(props), ..Default::default() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// =============================================================
// Page
// =============================================================

/// A page: the top-level container shapes are parented to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,
    pub name: String,
    /// Paint-order key among pages.
    pub index: String,
    #[serde(default)]
    pub meta: Meta,
}
