#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

use serde_json::json;
use tracing::debug;

use super::{ResizeInfo, ShapeUtil};
use crate::consts::{TEXT_FIXED_HEIGHT_FACTOR, TEXT_FIXED_WIDTH, TEXT_MAX_FONT_SIZE, TEXT_MIN_FONT_SIZE};
use crate::geom::{Bounds, Point, rotate_point};
use crate::metrics::{HeuristicMetrics, TextMetrics};
use crate::render::{Primitive, RenderDescription, Rotate, Style};
use crate::shape::{Shape, ShapeKind, ShapePatch, ShapeProps, TextAlign, TextProps};

/// Single-line text anchored at its top-left corner, editable in place.
pub struct TextUtil {
    metrics: Option<Box<dyn TextMetrics>>,
}

fn props(shape: &Shape) -> Option<&TextProps> {
    shape.props.as_text()
}

impl TextUtil {
    /// `metrics` measures auto-sized text; `None` falls back to the glyph-count heuristic.
    #[must_use]
    pub fn new(metrics: Option<Box<dyn TextMetrics>>) -> Self {
        Self { metrics }
    }

    fn measure(&self, p: &TextProps) -> (f64, f64) {
        let size = match &self.metrics {
            Some(m) => m.measure(&p.text, p.font_size, &p.font_family),
            None => HeuristicMetrics.measure(&p.text, p.font_size, &p.font_family),
        };
        (size.width, size.height)
    }

    /// Patch replacing the text content.
    #[must_use]
    pub fn update_text(&self, text: &str) -> ShapePatch {
        ShapePatch::props(json!({ "text": text }))
    }

    #[must_use]
    pub fn set_align(&self, align: TextAlign) -> ShapePatch {
        ShapePatch::props(json!({ "align": align }))
    }

    /// Patch setting the font size, clamped to the supported range.
    #[must_use]
    pub fn set_font_size(&self, font_size: f64) -> ShapePatch {
        ShapePatch::props(json!({ "fontSize": font_size.clamp(TEXT_MIN_FONT_SIZE, TEXT_MAX_FONT_SIZE) }))
    }
}

impl ShapeUtil for TextUtil {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Text
    }

    fn default_props(&self) -> ShapeProps {
        ShapeProps::Text(TextProps::default())
    }

    fn bounds(&self, shape: &Shape) -> Bounds {
        let Some(p) = props(shape) else {
            return Bounds::ZERO;
        };
        let (width, height) =
            if p.auto_size { self.measure(p) } else { (TEXT_FIXED_WIDTH, p.font_size * TEXT_FIXED_HEIGHT_FACTOR) };
        Bounds::new(shape.x, shape.y, width, height)
    }

    /// Rotated text turns about its origin, so the point is rotated back about
    /// the origin before the box test.
    fn hit_test(&self, shape: &Shape, point: Point) -> bool {
        if props(shape).is_none() {
            return false;
        }
        let local = if shape.rotation.abs() >= f64::EPSILON {
            rotate_point(point, shape.origin(), -shape.rotation)
        } else {
            point
        };
        self.bounds(shape).contains(local)
    }

    fn render(&self, shape: &Shape) -> Option<RenderDescription> {
        let p = props(shape)?;
        Some(RenderDescription {
            shape_id: shape.id,
            primitive: Primitive::Text {
                x: shape.x,
                y: shape.y + p.font_size,
                content: p.text.clone(),
                font_size: p.font_size,
                font_family: p.font_family.clone(),
                anchor: p.align.into(),
            },
            style: Style { fill: Some(p.color.clone()), ..Style::with_opacity(shape.opacity) },
            transform: Rotate::about(shape.rotation, shape.origin()),
        })
    }

    fn can_edit(&self, _shape: &Shape) -> bool {
        true
    }

    /// Auto-sized text follows its content and cannot be resized.
    fn can_resize(&self, shape: &Shape) -> bool {
        props(shape).is_some_and(|p| !p.auto_size)
    }

    fn on_resize(&self, shape: &Shape, info: &ResizeInfo) -> ShapePatch {
        if !self.can_resize(shape) {
            return ShapePatch::default();
        }
        ShapePatch::position(info.bounds.x, info.bounds.y)
    }

    fn on_edit_start(&self, shape: &Shape) {
        debug!(id = %shape.id, "text edit started");
    }

    fn on_edit_end(&self, shape: &Shape) {
        debug!(id = %shape.id, "text edit ended");
    }
}
