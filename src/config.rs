//! Editor configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;

use uuid::Uuid;

use crate::consts::{
    DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_PAGE_NAME, DEFAULT_WHEEL_ZOOM_SPEED, DEFAULT_ZOOM_STEP, DRAW_HIT_MARGIN,
};
use crate::shape::PageId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Parse { var: String, value: String },
    #[error("invalid zoom range: min {min} must be positive and not above max {max}")]
    ZoomRange { min: String, max: String },
    #[error("{name} out of range: {value}")]
    OutOfRange { name: &'static str, value: String },
}

/// What the wheel does when no zoom modifier is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelBehavior {
    /// Zoom with Ctrl/Meta held, otherwise pan.
    #[default]
    Zoom,
    /// Always pan.
    Pan,
    /// Ignore wheel input.
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Factor applied by `zoom_in` and divided out by `zoom_out`.
    pub zoom_step: f64,
    /// `k` in `zoom * (1 + k * -dy)` for modifier-wheel zoom.
    pub wheel_zoom_speed: f64,
    pub wheel_behavior: WheelBehavior,
    /// Slop added to stroke size when hit-testing open freehand strokes.
    /// Applied by [`Editor::with_config`](crate::Editor::with_config); a
    /// registry passed to [`Editor::new`](crate::Editor::new) keeps the
    /// margin of its own draw util.
    pub draw_hit_margin: f64,
    /// Id of the page to load from the store; a fresh id when absent.
    pub initial_page_id: Option<PageId>,
    pub initial_page_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            zoom_step: DEFAULT_ZOOM_STEP,
            wheel_zoom_speed: DEFAULT_WHEEL_ZOOM_SPEED,
            wheel_behavior: WheelBehavior::Zoom,
            draw_hit_margin: DRAW_HIT_MARGIN,
            initial_page_id: None,
            initial_page_name: DEFAULT_PAGE_NAME.to_string(),
        }
    }
}

impl EditorConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `DRAWCORE_MIN_ZOOM`: default 0.1
    /// - `DRAWCORE_MAX_ZOOM`: default 8
    /// - `DRAWCORE_ZOOM_STEP`: default 1.2
    /// - `DRAWCORE_WHEEL_ZOOM_SPEED`: default 0.01
    /// - `DRAWCORE_WHEEL_BEHAVIOR`: `zoom` (default), `pan` or `none`
    /// - `DRAWCORE_DRAW_HIT_MARGIN`: default 2
    /// - `DRAWCORE_PAGE_ID`: uuid of the page to open
    /// - `DRAWCORE_PAGE_NAME`: default "Page 1"
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but unparseable, or the
    /// resulting values fail [`EditorConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`EditorConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            min_zoom: parse_f64(&lookup, "DRAWCORE_MIN_ZOOM", defaults.min_zoom)?,
            max_zoom: parse_f64(&lookup, "DRAWCORE_MAX_ZOOM", defaults.max_zoom)?,
            zoom_step: parse_f64(&lookup, "DRAWCORE_ZOOM_STEP", defaults.zoom_step)?,
            wheel_zoom_speed: parse_f64(&lookup, "DRAWCORE_WHEEL_ZOOM_SPEED", defaults.wheel_zoom_speed)?,
            wheel_behavior: parse_wheel_behavior(lookup("DRAWCORE_WHEEL_BEHAVIOR").as_deref())?,
            draw_hit_margin: parse_f64(&lookup, "DRAWCORE_DRAW_HIT_MARGIN", defaults.draw_hit_margin)?,
            initial_page_id: parse_page_id(lookup("DRAWCORE_PAGE_ID").as_deref())?,
            initial_page_name: lookup("DRAWCORE_PAGE_NAME").unwrap_or(defaults.initial_page_name),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns an error if the zoom range is empty or non-positive, or a step
    /// or margin is not a positive finite number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_range = self.min_zoom.is_finite()
            && self.max_zoom.is_finite()
            && self.min_zoom > 0.0
            && self.min_zoom <= self.max_zoom;
        if !valid_range {
            return Err(ConfigError::ZoomRange { min: self.min_zoom.to_string(), max: self.max_zoom.to_string() });
        }
        require_positive("zoom_step", self.zoom_step)?;
        require_positive("wheel_zoom_speed", self.wheel_zoom_speed)?;
        if !(self.draw_hit_margin.is_finite() && self.draw_hit_margin >= 0.0) {
            return Err(ConfigError::OutOfRange { name: "draw_hit_margin", value: self.draw_hit_margin.to_string() });
        }
        Ok(())
    }

    /// Clamp `zoom` into the configured range. A NaN zoom lands on the
    /// minimum; an inverted range is read low to high.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        let lo = self.min_zoom.min(self.max_zoom);
        let hi = self.min_zoom.max(self.max_zoom);
        zoom.max(lo).min(hi)
    }
}

fn env_lookup(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        // Surface the raw bytes so the parse error names the bad value.
        Err(VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value: value.to_string() })
    }
}

fn parse_f64(lookup: &impl Fn(&str) -> Option<String>, var: &str, default: f64) -> Result<f64, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    raw.trim().parse::<f64>().map_err(|_| ConfigError::Parse { var: var.to_string(), value: raw.clone() })
}

fn parse_wheel_behavior(raw: Option<&str>) -> Result<WheelBehavior, ConfigError> {
    match raw.unwrap_or("zoom") {
        "zoom" => Ok(WheelBehavior::Zoom),
        "pan" => Ok(WheelBehavior::Pan),
        "none" => Ok(WheelBehavior::None),
        other => Err(ConfigError::Parse { var: "DRAWCORE_WHEEL_BEHAVIOR".into(), value: other.to_string() }),
    }
}

fn parse_page_id(raw: Option<&str>) -> Result<Option<PageId>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    Uuid::parse_str(raw.trim())
        .map(Some)
        .map_err(|_| ConfigError::Parse { var: "DRAWCORE_PAGE_ID".into(), value: raw.to_string() })
}
