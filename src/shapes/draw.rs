#[cfg(test)]
#[path = "draw_test.rs"]
mod draw_test;

use serde_json::json;

use super::{ResizeInfo, ShapeUtil};
use crate::consts::{CLOSED_PATH_FILL_OPACITY, DEFAULT_SIMPLIFY_TOLERANCE, DEFAULT_SMOOTHING, DRAW_HIT_MARGIN};
use crate::geom::{Bounds, Point, distance, distance_to_segment, point_in_polygon, simplify_path, smooth_path};
use crate::render::{Primitive, RenderDescription, Style, path_data};
use crate::shape::{DrawProps, Shape, ShapeKind, ShapePatch, ShapeProps};

/// Freehand stroke. Points are stored in page space; the shape origin is unused
/// for geometry.
#[derive(Debug, Clone, Copy)]
pub struct DrawUtil {
    /// Slop added to the stroke size when hit-testing open strokes.
    pub hit_margin: f64,
}

impl Default for DrawUtil {
    fn default() -> Self {
        Self { hit_margin: DRAW_HIT_MARGIN }
    }
}

fn props(shape: &Shape) -> Option<&DrawProps> {
    shape.props.as_draw()
}

fn points_patch(points: &[Point]) -> ShapePatch {
    ShapePatch::props(json!({ "points": points }))
}

impl DrawUtil {
    #[must_use]
    pub fn new(hit_margin: f64) -> Self {
        Self { hit_margin }
    }

    /// Patch replacing the points with a simplified stroke.
    #[must_use]
    pub fn simplify(&self, shape: &Shape, tolerance: Option<f64>) -> ShapePatch {
        let points = props(shape).map_or(&[][..], |p| p.points.as_slice());
        points_patch(&simplify_path(points, tolerance.unwrap_or(DEFAULT_SIMPLIFY_TOLERANCE)))
    }

    /// Patch replacing the points with a smoothed stroke.
    #[must_use]
    pub fn smooth(&self, shape: &Shape, smoothing: Option<f64>) -> ShapePatch {
        let points = props(shape).map_or(&[][..], |p| p.points.as_slice());
        points_patch(&smooth_path(points, smoothing.unwrap_or(DEFAULT_SMOOTHING)))
    }
}

impl ShapeUtil for DrawUtil {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Draw
    }

    fn default_props(&self) -> ShapeProps {
        ShapeProps::Draw(DrawProps::default())
    }

    /// Extent of the points padded by half the stroke size. Empty strokes have zero bounds.
    fn bounds(&self, shape: &Shape) -> Bounds {
        let Some(p) = props(shape) else {
            return Bounds::ZERO;
        };
        Bounds::from_points(&p.points).map_or(Bounds::ZERO, |b| b.expand(p.size / 2.0))
    }

    fn hit_test(&self, shape: &Shape, point: Point) -> bool {
        let Some(p) = props(shape) else {
            return false;
        };
        if p.is_closed {
            return point_in_polygon(point, &p.points);
        }
        let threshold = p.size + self.hit_margin;
        match p.points.as_slice() {
            [] => false,
            [only] => distance(point, *only) <= threshold,
            pts => pts.windows(2).any(|w| distance_to_segment(point, w[0], w[1]) <= threshold),
        }
    }

    fn render(&self, shape: &Shape) -> Option<RenderDescription> {
        let p = props(shape).filter(|p| !p.points.is_empty())?;
        let (fill, fill_opacity) =
            if p.is_closed { (Some(p.color.clone()), Some(CLOSED_PATH_FILL_OPACITY)) } else { (None, None) };
        Some(RenderDescription {
            shape_id: shape.id,
            primitive: Primitive::Path { d: path_data(&p.points, p.is_closed) },
            style: Style {
                fill,
                fill_opacity,
                stroke: Some(p.color.clone()),
                stroke_width: Some(p.size),
                round: true,
                opacity: shape.opacity,
            },
            transform: None,
        })
    }

    fn can_resize(&self, _shape: &Shape) -> bool {
        false
    }

    fn can_rotate(&self, _shape: &Shape) -> bool {
        false
    }

    fn on_resize(&self, _shape: &Shape, _info: &ResizeInfo) -> ShapePatch {
        ShapePatch::default()
    }

    fn on_rotate(&self, _shape: &Shape, _rotation: f64) -> ShapePatch {
        ShapePatch::default()
    }
}
