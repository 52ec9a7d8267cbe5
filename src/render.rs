//! Render descriptions: what a shape looks like, without drawing it.
//!
//! Each shape capability maps shape state to a [`RenderDescription`], a single
//! SVG-like primitive plus style and an optional rotation. The external
//! renderer turns these into pixels; nothing here performs I/O or mutates
//! application state.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::{Deserialize, Serialize};

use crate::geom::{Point, radians_to_degrees};
use crate::shape::{ShapeId, TextAlign};

/// SVG `text-anchor` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl From<TextAlign> for TextAnchor {
    fn from(align: TextAlign) -> Self {
        match align {
            TextAlign::Left => Self::Start,
            TextAlign::Center => Self::Middle,
            TextAlign::Right => Self::End,
        }
    }
}

/// Geometry of a render primitive, in page space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "element", rename_all = "lowercase")]
pub enum Primitive {
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
        ry: f64,
    },
    /// Text positioned at its baseline.
    #[serde(rename_all = "camelCase")]
    Text {
        x: f64,
        y: f64,
        content: String,
        font_size: f64,
        font_family: String,
        anchor: TextAnchor,
    },
    /// SVG path data.
    Path {
        d: String,
    },
}

/// Paint attributes. `None` fill means unfilled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Round caps and joins, used for freehand strokes.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub round: bool,
    pub opacity: f64,
}

impl Style {
    /// An empty style at the given opacity.
    #[must_use]
    pub fn with_opacity(opacity: f64) -> Self {
        Self { fill: None, fill_opacity: None, stroke: None, stroke_width: None, round: false, opacity }
    }
}

/// Rotation about a pivot, in degrees (SVG `rotate(deg cx cy)`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotate {
    pub degrees: f64,
    pub cx: f64,
    pub cy: f64,
}

impl Rotate {
    /// Rotation of `radians` about `pivot`, or `None` when unrotated.
    #[must_use]
    pub fn about(radians: f64, pivot: Point) -> Option<Self> {
        if radians.abs() < f64::EPSILON {
            return None;
        }
        Some(Self { degrees: radians_to_degrees(radians), cx: pivot.x, cy: pivot.y })
    }

    /// SVG transform attribute text.
    #[must_use]
    pub fn to_svg(&self) -> String {
        format!("rotate({} {} {})", self.degrees, self.cx, self.cy)
    }
}

/// Everything the renderer needs to draw one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderDescription {
    pub shape_id: ShapeId,
    pub primitive: Primitive,
    pub style: Style,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Rotate>,
}

/// SVG path data through `points`: `M x y L x y ...`, with ` Z` when closed.
/// Empty input yields an empty string.
#[must_use]
pub fn path_data(points: &[Point], closed: bool) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        d.push_str(&format!("{cmd} {} {}", p.x, p.y));
    }
    if closed && !points.is_empty() {
        d.push_str(" Z");
    }
    d
}
