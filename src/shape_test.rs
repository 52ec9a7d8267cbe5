#![allow(clippy::float_cmp)]

use serde_json::json;
use uuid::Uuid;

use super::*;

fn make_shape(props: ShapeProps) -> Shape {
    Shape::new(Uuid::new_v4(), Parent::Page(Uuid::new_v4()), "V".into(), props)
}

fn rect_shape() -> Shape {
    make_shape(ShapeProps::Rect(RectProps::default()))
}

// =============================================================
// ShapeKind
// =============================================================

#[test]
fn kind_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ShapeKind::Circle).unwrap(), "\"circle\"");
    assert_eq!(serde_json::to_string(&ShapeKind::Draw).unwrap(), "\"draw\"");
}

#[test]
fn kind_parses_every_tag() {
    for kind in ShapeKind::ALL {
        assert_eq!(kind.as_str().parse::<ShapeKind>().unwrap(), kind);
    }
}

#[test]
fn kind_rejects_unknown_tag() {
    let err = "hexagon".parse::<ShapeKind>().unwrap_err();
    assert!(matches!(err, ShapeError::UnknownType(ref t) if t == "hexagon"));
}

#[test]
fn kind_display_matches_tag() {
    assert_eq!(ShapeKind::Text.to_string(), "text");
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn circle_defaults() {
    let p = CircleProps::default();
    assert_eq!(p.radius, 50.0);
    assert_eq!(p.fill, "#e3e3e3");
    assert_eq!(p.stroke, "#1e1e1e");
    assert_eq!(p.stroke_width, 2.0);
}

#[test]
fn rect_defaults() {
    let p = RectProps::default();
    assert_eq!((p.width, p.height), (100.0, 100.0));
    assert_eq!(p.corner_radius, 0.0);
}

#[test]
fn text_defaults() {
    let p = TextProps::default();
    assert_eq!(p.text, "");
    assert_eq!(p.font_size, 16.0);
    assert_eq!(p.font_family, "sans-serif");
    assert_eq!(p.align, TextAlign::Left);
    assert!(p.auto_size);
}

#[test]
fn draw_defaults() {
    let p = DrawProps::default();
    assert!(p.points.is_empty());
    assert_eq!(p.size, 2.0);
    assert!(!p.is_closed);
}

#[test]
fn new_shape_has_neutral_common_fields() {
    let s = rect_shape();
    assert_eq!((s.x, s.y, s.rotation), (0.0, 0.0, 0.0));
    assert_eq!(s.opacity, 1.0);
    assert!(!s.is_locked);
    assert!(s.meta.is_empty());
    assert_eq!(s.kind(), ShapeKind::Rect);
}

// =============================================================
// Props decoding and merging
// =============================================================

#[test]
fn from_value_fills_missing_fields_with_defaults() {
    let props = ShapeProps::from_value(ShapeKind::Circle, json!({ "radius": 10 })).unwrap();
    let c = props.as_circle().unwrap();
    assert_eq!(c.radius, 10.0);
    assert_eq!(c.fill, "#e3e3e3");
}

#[test]
fn from_value_uses_camel_case_names() {
    let props = ShapeProps::from_value(ShapeKind::Text, json!({ "fontSize": 30, "autoSize": false })).unwrap();
    let t = props.as_text().unwrap();
    assert_eq!(t.font_size, 30.0);
    assert!(!t.auto_size);
}

#[test]
fn from_value_rejects_non_object() {
    let err = ShapeProps::from_value(ShapeKind::Rect, json!([1, 2])).unwrap_err();
    assert!(matches!(err, ShapeError::NotAnObject { kind: ShapeKind::Rect }));
}

#[test]
fn from_value_rejects_wrong_field_type() {
    let err = ShapeProps::from_value(ShapeKind::Rect, json!({ "width": "wide" })).unwrap_err();
    assert!(matches!(err, ShapeError::InvalidProps { kind: ShapeKind::Rect, .. }));
}

#[test]
fn to_value_round_trips_draw_points() {
    let props = ShapeProps::Draw(DrawProps { points: vec![Point::new(1.0, 2.0)], ..Default::default() });
    let value = props.to_value();
    assert_eq!(value["points"], json!([{ "x": 1.0, "y": 2.0 }]));
    assert_eq!(value["isClosed"], json!(false));
}

#[test]
fn merged_overwrites_only_given_keys() {
    let base = ShapeProps::Rect(RectProps { width: 40.0, ..Default::default() });
    let defaults = ShapeProps::default_for(ShapeKind::Rect);
    let out = ShapeProps::merged(&base, &json!({ "fill": "#ff0000" }), &defaults).unwrap();
    let r = out.as_rect().unwrap();
    assert_eq!(r.fill, "#ff0000");
    assert_eq!(r.width, 40.0);
}

#[test]
fn merged_null_resets_to_default() {
    let base = ShapeProps::Rect(RectProps { width: 40.0, ..Default::default() });
    let defaults = ShapeProps::default_for(ShapeKind::Rect);
    let out = ShapeProps::merged(&base, &json!({ "width": null }), &defaults).unwrap();
    assert_eq!(out.as_rect().unwrap().width, 100.0);
}

#[test]
fn merged_ignores_unknown_keys() {
    let base = ShapeProps::default_for(ShapeKind::Circle);
    let out = ShapeProps::merged(&base, &json!({ "sparkle": true }), &base).unwrap();
    assert_eq!(out, base);
}

#[test]
fn accessors_reject_other_kinds() {
    let props = ShapeProps::default_for(ShapeKind::Circle);
    assert!(props.as_rect().is_none());
    assert!(props.as_text().is_none());
    assert!(props.as_draw().is_none());
}

// =============================================================
// apply_patch
// =============================================================

#[test]
fn patch_fill_preserves_dimensions() {
    let mut s = rect_shape();
    s.apply_patch(&ShapePatch::props(json!({ "fill": "#123456" }))).unwrap();
    let r = s.props.as_rect().unwrap();
    assert_eq!(r.fill, "#123456");
    assert_eq!((r.width, r.height), (100.0, 100.0));
}

#[test]
fn patch_sets_common_fields() {
    let mut s = rect_shape();
    let patch = ShapePatch {
        x: Some(5.0),
        rotation: Some(1.5),
        opacity: Some(0.5),
        is_locked: Some(true),
        index: Some("W".into()),
        ..Default::default()
    };
    s.apply_patch(&patch).unwrap();
    assert_eq!(s.x, 5.0);
    assert_eq!(s.y, 0.0);
    assert_eq!(s.rotation, 1.5);
    assert_eq!(s.opacity, 0.5);
    assert!(s.is_locked);
    assert_eq!(s.index, "W");
}

#[test]
fn failed_props_patch_leaves_shape_untouched() {
    let mut s = rect_shape();
    let before = s.clone();
    let patch = ShapePatch { x: Some(99.0), props: Some(json!({ "height": "tall" })), ..Default::default() };
    assert!(s.apply_patch(&patch).is_err());
    assert_eq!(s, before);
}

#[test]
fn empty_patch_is_empty() {
    assert!(ShapePatch::default().is_empty());
    assert!(!ShapePatch::position(1.0, 2.0).is_empty());
}

#[test]
fn patch_serializes_only_present_fields() {
    let json = serde_json::to_value(ShapePatch::position(1.0, 2.0)).unwrap();
    assert_eq!(json, json!({ "x": 1.0, "y": 2.0 }));
}

// =============================================================
// Wire format
// =============================================================

#[test]
fn shape_serializes_flat_with_type_tag() {
    let s = make_shape(ShapeProps::default_for(ShapeKind::Circle));
    let json = serde_json::to_value(&s).unwrap();
    assert_eq!(json["type"], "circle");
    assert_eq!(json["props"]["radius"], 50.0);
    assert_eq!(json["isLocked"], false);
    assert_eq!(json["parentId"]["kind"], "page");
}

#[test]
fn shape_round_trips_through_json() {
    let mut s = make_shape(ShapeProps::Text(TextProps { text: "hi".into(), ..Default::default() }));
    s.meta.insert("author".into(), json!("ada"));
    let back: Shape = serde_json::from_value(serde_json::to_value(&s).unwrap()).unwrap();
    assert_eq!(back, s);
}

#[test]
fn shape_deserialize_applies_missing_defaults() {
    let id = Uuid::new_v4();
    let page = Uuid::new_v4();
    let json = json!({
        "id": id,
        "type": "rect",
        "parentId": { "kind": "page", "id": page },
        "x": 1, "y": 2,
        "index": "V",
        "props": { "width": 7 }
    });
    let s: Shape = serde_json::from_value(json).unwrap();
    assert_eq!(s.opacity, 1.0);
    assert_eq!(s.props.as_rect().unwrap().width, 7.0);
    assert_eq!(s.props.as_rect().unwrap().height, 100.0);
    assert_eq!(s.parent_id.page(), Some(page));
}

#[test]
fn shape_deserialize_rejects_unknown_type() {
    let json = json!({
        "id": Uuid::new_v4(),
        "type": "hexagon",
        "parentId": { "kind": "page", "id": Uuid::new_v4() },
        "x": 0, "y": 0, "index": "V"
    });
    assert!(serde_json::from_value::<Shape>(json).is_err());
}

#[test]
fn parent_shape_has_no_page() {
    assert_eq!(Parent::Shape(Uuid::new_v4()).page(), None);
}

#[test]
fn page_serializes_camel_case() {
    let page = Page { id: Uuid::new_v4(), name: "Page 1".into(), index: "V".into(), meta: Meta::new() };
    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["name"], "Page 1");
    let back: Page = serde_json::from_value(json).unwrap();
    assert_eq!(back, page);
}
