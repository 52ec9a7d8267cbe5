#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::shape::Parent;

fn stroke(points: &[(f64, f64)], size: f64, is_closed: bool) -> Shape {
    let props = DrawProps {
        points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        size,
        is_closed,
        ..Default::default()
    };
    Shape::new(Uuid::new_v4(), Parent::Page(Uuid::new_v4()), "V".into(), ShapeProps::Draw(props))
}

fn demo_stroke() -> Shape {
    stroke(&[(600.0, 200.0), (620.0, 220.0), (640.0, 210.0), (660.0, 230.0), (680.0, 220.0), (700.0, 240.0)], 3.0, false)
}

fn square(closed: bool) -> Shape {
    stroke(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], 2.0, closed)
}

// =============================================================
// Bounds
// =============================================================

#[test]
fn bounds_padded_by_half_size() {
    let b = DrawUtil::default().bounds(&demo_stroke());
    assert_eq!(b, Bounds::new(598.5, 198.5, 103.0, 43.0));
}

#[test]
fn bounds_contain_minimum_point() {
    let s = demo_stroke();
    assert!(DrawUtil::default().bounds(&s).contains(Point::new(600.0, 200.0)));
}

#[test]
fn empty_stroke_has_zero_bounds() {
    assert_eq!(DrawUtil::default().bounds(&stroke(&[], 2.0, false)), Bounds::ZERO);
}

// =============================================================
// Hit
// =============================================================

#[test]
fn hit_on_segment_midpoint() {
    assert!(DrawUtil::default().hit_test(&demo_stroke(), Point::new(610.0, 210.0)));
}

#[test]
fn miss_far_away() {
    assert!(!DrawUtil::default().hit_test(&demo_stroke(), Point::new(1100.0, 500.0)));
}

#[test]
fn hit_within_size_plus_margin() {
    let s = stroke(&[(0.0, 0.0), (100.0, 0.0)], 3.0, false);
    let util = DrawUtil::default();
    assert!(util.hit_test(&s, Point::new(50.0, 5.0)));
    assert!(!util.hit_test(&s, Point::new(50.0, 5.1)));
}

#[test]
fn custom_margin_widens_hit() {
    let s = stroke(&[(0.0, 0.0), (100.0, 0.0)], 3.0, false);
    assert!(DrawUtil::new(10.0).hit_test(&s, Point::new(50.0, 12.0)));
}

#[test]
fn single_point_hits_nearby() {
    let s = stroke(&[(5.0, 5.0)], 2.0, false);
    assert!(DrawUtil::default().hit_test(&s, Point::new(7.0, 7.0)));
    assert!(!DrawUtil::default().hit_test(&s, Point::new(10.0, 10.0)));
}

#[test]
fn empty_stroke_never_hits() {
    assert!(!DrawUtil::default().hit_test(&stroke(&[], 2.0, false), Point::new(0.0, 0.0)));
}

#[test]
fn closed_stroke_hits_interior() {
    let util = DrawUtil::default();
    assert!(util.hit_test(&square(true), Point::new(5.0, 5.0)));
    assert!(!util.hit_test(&square(true), Point::new(15.0, 5.0)));
}

#[test]
fn open_stroke_misses_interior() {
    assert!(!DrawUtil::default().hit_test(&square(false), Point::new(5.0, 5.0)));
}

#[test]
fn hit_center_of_bounds_for_closed() {
    let util = DrawUtil::default();
    let s = square(true);
    assert!(util.hit_test(&s, util.center(&s)));
}

// =============================================================
// Render
// =============================================================

#[test]
fn render_open_path() {
    let s = stroke(&[(0.0, 0.0), (10.0, 5.0)], 3.0, false);
    let desc = DrawUtil::default().render(&s).unwrap();
    assert_eq!(desc.primitive, Primitive::Path { d: "M 0 0 L 10 5".into() });
    assert!(desc.style.fill.is_none());
    assert_eq!(desc.style.stroke_width, Some(3.0));
    assert!(desc.style.round);
    assert!(desc.transform.is_none());
}

#[test]
fn render_closed_path_is_lightly_filled() {
    let desc = DrawUtil::default().render(&square(true)).unwrap();
    assert_eq!(desc.primitive, Primitive::Path { d: "M 0 0 L 10 0 L 10 10 L 0 10 Z".into() });
    assert_eq!(desc.style.fill.as_deref(), Some("#1e1e1e"));
    assert_eq!(desc.style.fill_opacity, Some(0.1));
}

#[test]
fn render_empty_is_none() {
    assert!(DrawUtil::default().render(&stroke(&[], 2.0, false)).is_none());
}

// =============================================================
// Capabilities / helpers
// =============================================================

#[test]
fn strokes_cannot_resize_or_rotate() {
    let util = DrawUtil::default();
    let s = demo_stroke();
    assert!(!util.can_resize(&s));
    assert!(!util.can_rotate(&s));
    assert!(util.on_rotate(&s, 1.0).is_empty());
    assert!(util.on_resize(&s, &ResizeInfo::unlocked(Bounds::new(0.0, 0.0, 1.0, 1.0), 1.0, 1.0)).is_empty());
}

#[test]
fn simplify_collinear_stroke() {
    let mut s = stroke(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)], 2.0, false);
    let patch = DrawUtil::default().simplify(&s, None);
    s.apply_patch(&patch).unwrap();
    assert_eq!(s.props.as_draw().unwrap().points, vec![Point::new(0.0, 0.0), Point::new(3.0, 0.0)]);
}

#[test]
fn smooth_keeps_endpoints() {
    let mut s = stroke(&[(0.0, 0.0), (1.0, 2.0), (2.0, 0.0)], 2.0, false);
    s.apply_patch(&DrawUtil::default().smooth(&s, Some(1.0))).unwrap();
    let pts = &s.props.as_draw().unwrap().points;
    assert_eq!(pts[0], Point::new(0.0, 0.0));
    assert_eq!(pts[1], Point::new(1.0, 0.0));
    assert_eq!(pts[2], Point::new(2.0, 0.0));
}
