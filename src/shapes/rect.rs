#[cfg(test)]
#[path = "rect_test.rs"]
mod rect_test;

use serde_json::json;

use super::{ResizeInfo, ShapeUtil};
use crate::consts::MIN_SHAPE_SIZE;
use crate::geom::{Bounds, Point, boxes_intersect, convex_polygons_intersect, rotate_point};
use crate::render::{Primitive, RenderDescription, Rotate, Style};
use crate::shape::{RectProps, Shape, ShapeKind, ShapePatch, ShapeProps};

/// Rectangle with its top-left corner at the shape origin, rotated about its center.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectUtil;

fn props(shape: &Shape) -> Option<&RectProps> {
    shape.props.as_rect()
}

fn is_rotated(shape: &Shape) -> bool {
    shape.rotation.abs() >= f64::EPSILON
}

/// Width and height with the minimum size floor applied.
fn size(p: &RectProps) -> (f64, f64) {
    (p.width.max(MIN_SHAPE_SIZE), p.height.max(MIN_SHAPE_SIZE))
}

fn rect_center(shape: &Shape, p: &RectProps) -> Point {
    let (w, h) = size(p);
    Point::new(shape.x + w / 2.0, shape.y + h / 2.0)
}

impl RectUtil {
    /// Corners in page space, clockwise from top-left, rotated about the center.
    #[must_use]
    pub fn corners(&self, shape: &Shape) -> Vec<Point> {
        let Some(p) = props(shape) else {
            return Vec::new();
        };
        let (x, y) = (shape.x, shape.y);
        let (w, h) = size(p);
        let corners = [Point::new(x, y), Point::new(x + w, y), Point::new(x + w, y + h), Point::new(x, y + h)];
        if !is_rotated(shape) {
            return corners.to_vec();
        }
        let center = rect_center(shape, p);
        corners.iter().map(|&c| rotate_point(c, center, shape.rotation)).collect()
    }

    /// Whether two rectangles overlap. Touching edges count.
    ///
    /// Unrotated pairs use a box test; otherwise a separating-axis test over
    /// the rotated corners.
    #[must_use]
    pub fn intersects_rect(&self, a: &Shape, b: &Shape) -> bool {
        if props(a).is_none() || props(b).is_none() {
            return false;
        }
        if !is_rotated(a) && !is_rotated(b) {
            return boxes_intersect(&self.bounds(a), &self.bounds(b));
        }
        convex_polygons_intersect(&self.corners(a), &self.corners(b))
    }
}

impl ShapeUtil for RectUtil {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rect
    }

    fn default_props(&self) -> ShapeProps {
        ShapeProps::Rect(RectProps::default())
    }

    fn bounds(&self, shape: &Shape) -> Bounds {
        props(shape).map_or(Bounds::ZERO, |p| {
            let (w, h) = size(p);
            Bounds::new(shape.x, shape.y, w, h)
        })
    }

    fn hit_test(&self, shape: &Shape, point: Point) -> bool {
        let Some(p) = props(shape) else {
            return false;
        };
        let local = if is_rotated(shape) {
            // Undo the rotation about the center, then test the unrotated frame.
            rotate_point(point, rect_center(shape, p), -shape.rotation)
        } else {
            point
        };
        self.bounds(shape).contains(local)
    }

    fn render(&self, shape: &Shape) -> Option<RenderDescription> {
        let p = props(shape)?;
        let (width, height) = size(p);
        Some(RenderDescription {
            shape_id: shape.id,
            primitive: Primitive::Rect {
                x: shape.x,
                y: shape.y,
                width,
                height,
                rx: p.corner_radius,
                ry: p.corner_radius,
            },
            style: Style {
                fill: Some(p.fill.clone()),
                stroke: Some(p.stroke.clone()),
                stroke_width: Some(p.stroke_width),
                ..Style::with_opacity(shape.opacity)
            },
            transform: Rotate::about(shape.rotation, rect_center(shape, p)),
        })
    }

    /// With the aspect locked, the axis that moved most drives the other one.
    fn on_resize(&self, shape: &Shape, info: &ResizeInfo) -> ShapePatch {
        let b = info.bounds;
        let (mut width, mut height) = (b.width, b.height);
        if info.is_aspect_ratio_locked {
            if let Some(p) = props(shape).filter(|p| p.width > 0.0 && p.height > 0.0) {
                let aspect = p.width / p.height;
                if info.scale_x.abs() > info.scale_y.abs() {
                    height = width / aspect;
                } else {
                    width = height * aspect;
                }
            }
        }
        ShapePatch {
            x: Some(b.x),
            y: Some(b.y),
            props: Some(json!({
                "width": width.max(MIN_SHAPE_SIZE),
                "height": height.max(MIN_SHAPE_SIZE),
            })),
            ..Default::default()
        }
    }
}
