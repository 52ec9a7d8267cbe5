use uuid::Uuid;

use super::*;
use crate::shape::Parent;

struct StubUtil;

impl ShapeUtil for StubUtil {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn default_props(&self) -> ShapeProps {
        ShapeProps::default_for(ShapeKind::Circle)
    }

    fn bounds(&self, _shape: &Shape) -> Bounds {
        Bounds::new(0.0, 0.0, 4.0, 2.0)
    }

    fn hit_test(&self, _shape: &Shape, _point: Point) -> bool {
        true
    }

    fn render(&self, _shape: &Shape) -> Option<RenderDescription> {
        None
    }
}

fn shape_of(kind: ShapeKind) -> Shape {
    Shape::new(Uuid::new_v4(), Parent::Page(Uuid::new_v4()), "V".into(), ShapeProps::default_for(kind))
}

// =============================================================
// Registry
// =============================================================

#[test]
fn defaults_register_every_kind() {
    let registry = ShapeUtilRegistry::default();
    assert_eq!(registry.kinds(), ShapeKind::ALL.to_vec());
    for kind in ShapeKind::ALL {
        assert_eq!(registry.get(kind).unwrap().kind(), kind);
    }
}

#[test]
fn empty_registry_has_nothing() {
    let registry = ShapeUtilRegistry::new();
    assert!(!registry.has(ShapeKind::Rect));
    assert!(registry.get(ShapeKind::Rect).is_none());
}

#[test]
fn for_shape_dispatches_on_kind() {
    let registry = ShapeUtilRegistry::default();
    let s = shape_of(ShapeKind::Draw);
    assert_eq!(registry.for_shape(&s).unwrap().kind(), ShapeKind::Draw);
}

#[test]
fn register_replaces_existing() {
    let mut registry = ShapeUtilRegistry::default();
    registry.register(Box::new(StubUtil));
    let s = shape_of(ShapeKind::Circle);
    let util = registry.for_shape(&s).unwrap();
    assert_eq!(util.bounds(&s), Bounds::new(0.0, 0.0, 4.0, 2.0));
}

#[test]
fn default_props_match_shape_defaults() {
    let registry = ShapeUtilRegistry::default();
    for kind in ShapeKind::ALL {
        assert_eq!(registry.get(kind).unwrap().default_props(), ShapeProps::default_for(kind));
    }
}

#[test]
fn every_default_shape_hits_its_center() {
    let registry = ShapeUtilRegistry::default();
    for kind in ShapeKind::ALL {
        let mut s = shape_of(kind);
        if kind == ShapeKind::Draw {
            s.props = ShapeProps::Draw(crate::shape::DrawProps {
                points: vec![Point::new(0.0, 0.0), Point::new(20.0, 0.0)],
                ..Default::default()
            });
        }
        let util = registry.for_shape(&s).unwrap();
        assert!(util.hit_test(&s, util.center(&s)), "{kind} missed its center");
    }
}

// =============================================================
// Contract defaults
// =============================================================

#[test]
fn stub_inherits_contract_defaults() {
    let s = shape_of(ShapeKind::Circle);
    assert_eq!(StubUtil.center(&s), Point::new(2.0, 1.0));
    assert!(StubUtil.can_resize(&s));
    assert!(StubUtil.can_rotate(&s));
    assert!(!StubUtil.can_edit(&s));
    assert!(!StubUtil.can_bind(&s));
    assert_eq!(StubUtil.resize_handles(&s).len(), 8);
    let patch = StubUtil.on_resize(&s, &ResizeInfo::unlocked(Bounds::new(3.0, 4.0, 1.0, 1.0), 1.0, 1.0));
    assert_eq!(patch, ShapePatch::position(3.0, 4.0));
}

#[test]
fn handles_list_corners_first() {
    assert!(ResizeHandle::ALL[..4].iter().all(|h| h.is_corner()));
    assert!(ResizeHandle::ALL[4..].iter().all(|h| !h.is_corner()));
}

#[test]
fn handle_serializes_kebab_case() {
    assert_eq!(serde_json::to_string(&ResizeHandle::TopLeft).unwrap(), "\"top-left\"");
}
