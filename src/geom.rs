//! Geometry primitives: points, vectors, axis-aligned bounds, and the pure
//! functions the shape capabilities and the editor build on.
//!
//! Everything in this module is side-effect free. Angles are radians unless a
//! function name says otherwise. Path routines are iterative so pathological
//! inputs (thousands of near-collinear points) cannot exhaust the stack.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::f64::consts::{PI, TAU};
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::GEOM_EPSILON;

// =============================================================
// Point / Vector
// =============================================================

/// A point in world or screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A free vector. `z` is optional on the wire and treated as 0 when absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0, z: 0.0 };

    /// A planar vector (`z = 0`).
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    #[must_use]
    pub fn new3(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction; the zero vector maps to itself.
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Self::ZERO;
        }
        self * (1.0 / len)
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new3(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new3(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, scalar: f64) -> Vector {
        Vector::new3(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

// =============================================================
// Bounds
// =============================================================

/// Axis-aligned box. `width` and `height` are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const ZERO: Bounds = Bounds { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest box containing both corners, in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let min_x = a.x.min(b.x);
        let min_y = a.y.min(b.y);
        Self::new(min_x, min_y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Bounding box of a point set, or `None` when the set is empty.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        box_center(self)
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point_in_box(point, self)
    }

    #[must_use]
    pub fn intersects(&self, other: &Bounds) -> bool {
        boxes_intersect(self, other)
    }

    #[must_use]
    pub fn expand(&self, amount: f64) -> Self {
        expand_box(self, amount)
    }
}

/// Union of all boxes. An empty slice yields [`Bounds::ZERO`].
#[must_use]
pub fn union_boxes(boxes: &[Bounds]) -> Bounds {
    let Some(first) = boxes.first() else {
        return Bounds::ZERO;
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.max_x(), first.max_y());
    for b in &boxes[1..] {
        min_x = min_x.min(b.x);
        min_y = min_y.min(b.y);
        max_x = max_x.max(b.max_x());
        max_y = max_y.max(b.max_y());
    }
    Bounds::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Whether two boxes overlap. Boxes that only touch along an edge intersect.
#[must_use]
pub fn boxes_intersect(a: &Bounds, b: &Bounds) -> bool {
    !(a.max_x() < b.x || b.max_x() < a.x || a.max_y() < b.y || b.max_y() < a.y)
}

/// Inclusive containment: points on the box edge are inside.
#[must_use]
pub fn point_in_box(point: Point, b: &Bounds) -> bool {
    point.x >= b.x && point.x <= b.max_x() && point.y >= b.y && point.y <= b.max_y()
}

/// Grow a box by `amount` on every side.
#[must_use]
pub fn expand_box(b: &Bounds, amount: f64) -> Bounds {
    Bounds::new(b.x - amount, b.y - amount, b.width + amount * 2.0, b.height + amount * 2.0)
}

#[must_use]
pub fn box_center(b: &Bounds) -> Point {
    Point::new(b.x + b.width / 2.0, b.y + b.height / 2.0)
}

// =============================================================
// Scalars, angles, interpolation
// =============================================================

#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).length()
}

/// Rotate `point` about `center` by `angle` radians.
#[must_use]
pub fn rotate_point(point: Point, center: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
}

#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[must_use]
pub fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

#[must_use]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

#[must_use]
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

/// Map any angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let r = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if r >= TAU { 0.0 } else { r }
}

#[must_use]
pub fn approximately(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

// =============================================================
// Segments and polygons
// =============================================================

/// Distance from `point` to the closed segment `a`–`b`.
#[must_use]
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq == 0.0 {
        return distance(point, a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    distance(point, a + ab * t)
}

/// Polygon containment by ray casting over the wrap-around edge list.
///
/// The polygon is treated as closed: a point lying on any edge (within
/// [`GEOM_EPSILON`]) is inside. Off the boundary, an edge counts as crossed
/// when exactly one of its endpoints lies strictly above the point and the
/// crossing is strictly to the right of it.
#[must_use]
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    let Some(&last) = vertices.last() else {
        return false;
    };

    let mut prev = last;
    for &v in vertices {
        if distance_to_segment(point, prev, v) <= GEOM_EPSILON {
            return true;
        }
        prev = v;
    }

    let mut inside = false;
    let mut vj = last;
    for &vi in vertices {
        if (vi.y > point.y) != (vj.y > point.y) {
            let x_cross = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        vj = vi;
    }
    inside
}

/// Separating-axis overlap test for two convex polygons. Touching counts as overlap.
#[must_use]
pub fn convex_polygons_intersect(a: &[Point], b: &[Point]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    !has_separating_axis(a, b) && !has_separating_axis(b, a)
}

fn has_separating_axis(edges_of: &[Point], other: &[Point]) -> bool {
    let mut prev = edges_of[edges_of.len() - 1];
    for &v in edges_of {
        let edge = v - prev;
        let axis = Vector::new(-edge.y, edge.x);
        prev = v;
        if axis == Vector::ZERO {
            continue;
        }
        let (min_a, max_a) = project(edges_of, axis);
        let (min_b, max_b) = project(other, axis);
        if max_a < min_b || max_b < min_a {
            return true;
        }
    }
    false
}

fn project(points: &[Point], axis: Vector) -> (f64, f64) {
    points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        let d = Vector::new(p.x, p.y).dot(axis);
        (lo.min(d), hi.max(d))
    })
}

// =============================================================
// Paths
// =============================================================

/// Ramer–Douglas–Peucker simplification.
///
/// Keeps both endpoints and every point whose distance from the chord of its
/// enclosing span exceeds `tolerance`. Negative or NaN tolerances are treated
/// as zero.
#[must_use]
pub fn simplify_path(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let tolerance = tolerance.max(0.0);
    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut spans = vec![(0usize, last)];
    while let Some((start, end)) = spans.pop() {
        if end <= start + 1 {
            continue;
        }
        let (a, b) = (points[start], points[end]);
        let mut max_dist = 0.0;
        let mut max_index = start;
        for (i, p) in points.iter().enumerate().take(end).skip(start + 1) {
            let d = distance_to_segment(*p, a, b);
            if d > max_dist {
                max_dist = d;
                max_index = i;
            }
        }
        if max_dist > tolerance {
            keep[max_index] = true;
            spans.push((start, max_index));
            spans.push((max_index, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// Blend each interior point toward the midpoint of its neighbours.
///
/// `smoothing` is clamped to `[0, 1]`; 0 returns the input unchanged.
/// Endpoints are never moved. Reads always come from the original points.
#[must_use]
pub fn smooth_path(points: &[Point], smoothing: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let s = smoothing.clamp(0.0, 1.0);
    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);
    for w in points.windows(3) {
        let (prev, curr, next) = (w[0], w[1], w[2]);
        let mid = lerp_point(prev, next, 0.5);
        out.push(lerp_point(curr, mid, s));
    }
    out.push(points[points.len() - 1]);
    out
}
