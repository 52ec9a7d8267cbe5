#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn heuristic_width_scales_with_glyph_count() {
    let size = HeuristicMetrics.measure("hello", 10.0, "serif");
    assert!((size.width - 30.0).abs() < 1e-9);
    assert!((size.height - 12.0).abs() < 1e-9);
}

#[test]
fn heuristic_counts_chars_not_bytes() {
    let ascii = HeuristicMetrics.measure("ab", 10.0, "serif");
    let wide = HeuristicMetrics.measure("éü", 10.0, "serif");
    assert_eq!(ascii.width, wide.width);
}

#[test]
fn heuristic_empty_text_has_zero_width() {
    let size = HeuristicMetrics.measure("", 16.0, "sans-serif");
    assert_eq!(size.width, 0.0);
    assert!(size.height > 0.0);
}

#[test]
fn closures_are_metrics() {
    let fixed = |_: &str, _: f64, _: &str| TextSize { width: 42.0, height: 7.0 };
    assert_eq!(fixed.measure("anything", 99.0, "mono"), TextSize { width: 42.0, height: 7.0 });
}
