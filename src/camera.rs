#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::geom::Point;

/// Viewport transform: `device = world * z + (x, y)`.
///
/// `x` / `y` are pan offsets in device pixels.
/// `z` is the zoom scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, z: 1.0 }
    }
}

impl Camera {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert a device-space point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point { x: (screen.x - self.x) / self.z, y: (screen.y - self.y) / self.z }
    }

    /// Convert a world-space point to device coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point { x: world.x * self.z + self.x, y: world.y * self.z + self.y }
    }
}
