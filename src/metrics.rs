//! Text measurement seam.
//!
//! Text bounds depend on how the host lays out glyphs, which this crate cannot
//! know. Hosts plug a [`TextMetrics`] implementation into the text capability;
//! without one the [`HeuristicMetrics`] estimate is used.

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_test;

use crate::consts::{TEXT_GLYPH_WIDTH_FACTOR, TEXT_LINE_HEIGHT_FACTOR};

/// Measured extent of a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

/// Measures text for a given font.
pub trait TextMetrics {
    fn measure(&self, text: &str, font_size: f64, font_family: &str) -> TextSize;
}

/// Fixed-advance estimate: every glyph is `0.6 * font_size` wide, lines are
/// `1.2 * font_size` tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMetrics;

impl TextMetrics for HeuristicMetrics {
    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, text: &str, font_size: f64, _font_family: &str) -> TextSize {
        let glyphs = text.chars().count() as f64;
        TextSize { width: glyphs * font_size * TEXT_GLYPH_WIDTH_FACTOR, height: font_size * TEXT_LINE_HEIGHT_FACTOR }
    }
}

impl<F> TextMetrics for F
where
    F: Fn(&str, f64, &str) -> TextSize,
{
    fn measure(&self, text: &str, font_size: f64, font_family: &str) -> TextSize {
        self(text, font_size, font_family)
    }
}
