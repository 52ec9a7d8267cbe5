#[cfg(test)]
#[path = "circle_test.rs"]
mod circle_test;

use serde_json::json;

use super::{ResizeInfo, ShapeUtil};
use crate::consts::MIN_SHAPE_SIZE;
use crate::geom::{Bounds, Point, distance};
use crate::render::{Primitive, RenderDescription, Rotate, Style};
use crate::shape::{CircleProps, Shape, ShapeKind, ShapePatch, ShapeProps};

/// Circle centered on the shape origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleUtil;

fn props(shape: &Shape) -> Option<&CircleProps> {
    shape.props.as_circle()
}

/// Radius with the minimum size floor; negative or NaN radii from loose
/// props collapse to the smallest circle.
fn radius(p: &CircleProps) -> f64 {
    p.radius.max(MIN_SHAPE_SIZE / 2.0)
}

impl CircleUtil {
    /// Point on the circumference at `angle` radians from the positive x axis.
    #[must_use]
    pub fn point_on_circle(&self, shape: &Shape, angle: f64) -> Point {
        let r = props(shape).map_or(0.0, radius);
        let (sin, cos) = angle.sin_cos();
        Point::new(shape.x + r * cos, shape.y + r * sin)
    }

    /// Whether two circles overlap or touch.
    #[must_use]
    pub fn intersects_circle(&self, a: &Shape, b: &Shape) -> bool {
        let (Some(pa), Some(pb)) = (props(a), props(b)) else {
            return false;
        };
        distance(a.origin(), b.origin()) <= radius(pa) + radius(pb)
    }
}

impl ShapeUtil for CircleUtil {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn default_props(&self) -> ShapeProps {
        ShapeProps::Circle(CircleProps::default())
    }

    fn bounds(&self, shape: &Shape) -> Bounds {
        let Some(p) = props(shape) else {
            return Bounds::ZERO;
        };
        let r = radius(p);
        Bounds::new(shape.x - r, shape.y - r, r * 2.0, r * 2.0)
    }

    fn hit_test(&self, shape: &Shape, point: Point) -> bool {
        props(shape).is_some_and(|p| distance(point, shape.origin()) <= radius(p))
    }

    fn render(&self, shape: &Shape) -> Option<RenderDescription> {
        let p = props(shape)?;
        Some(RenderDescription {
            shape_id: shape.id,
            primitive: Primitive::Circle { cx: shape.x, cy: shape.y, r: radius(p) },
            style: Style {
                fill: Some(p.fill.clone()),
                stroke: Some(p.stroke.clone()),
                stroke_width: Some(p.stroke_width),
                ..Style::with_opacity(shape.opacity)
            },
            transform: Rotate::about(shape.rotation, shape.origin()),
        })
    }

    /// Circles always keep their aspect: the radius follows the shorter side
    /// of the target frame and the origin moves to the frame's center.
    fn on_resize(&self, _shape: &Shape, info: &ResizeInfo) -> ShapePatch {
        let b = info.bounds;
        let radius = (b.width.min(b.height) / 2.0).max(MIN_SHAPE_SIZE / 2.0);
        let center = b.center();
        ShapePatch { x: Some(center.x), y: Some(center.y), props: Some(json!({ "radius": radius })), ..Default::default() }
    }
}
