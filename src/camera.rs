#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

/// A point in either screen or drawing-surface space.
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

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Direction from `self` to `other` in degrees, normalized to `[0, 360)`.
    ///
    /// The surface y axis points down, so 90° points towards larger y.
    #[must_use]
    pub fn angle_to(self, other: Point) -> f64 {
        let deg = (other.y - self.y).atan2(other.x - self.x).to_degrees();
        normalize_degrees(deg)
    }

    /// The point `distance` away from `self` in direction `degrees`.
    #[must_use]
    pub fn offset_polar(self, degrees: f64, distance: f64) -> Point {
        let (dx, dy) = unit_vector(degrees);
        Point { x: self.x + dx * distance, y: self.y + dy * distance }
    }

    /// Translate by `(dx, dy)`.
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Point {
        Point { x: self.x + dx, y: self.y + dy }
    }

    /// Rotate `self` by a quarter turn about `center`, in the direction angles are measured.
    #[must_use]
    pub fn rotated_quarter_about(self, center: Point) -> Point {
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point { x: center.x - dy, y: center.y + dx }
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit direction vector for `degrees`.
///
/// Multiples of 90° return exact axis vectors so snapped endpoints land
/// exactly on the axis instead of picking up `cos(π/2)` residue.
#[must_use]
pub fn unit_vector(degrees: f64) -> (f64, f64) {
    let deg = normalize_degrees(degrees);
    if deg == 0.0 {
        (1.0, 0.0)
    } else if deg == 90.0 {
        (0.0, 1.0)
    } else if deg == 180.0 {
        (-1.0, 0.0)
    } else if deg == 270.0 {
        (0.0, -1.0)
    } else {
        let rad = deg.to_radians();
        (rad.cos(), rad.sin())
    }
}

/// Round `value` to `decimals` fractional digits.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals == 0 {
        return value.round();
    }
    let factor = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    (value * factor).round() / factor
}

/// Zoom state of the drawing surface.
///
/// `zoom` is a scale factor (1.0 = no zoom). Stored coordinates never change
/// with zoom; it only affects drawing and pointer conversion.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to surface coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point { x: screen.x / self.zoom, y: screen.y / self.zoom }
    }

    /// Convert a screen-space distance (pixels) to surface distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Zoom in one step, capped at [`MAX_ZOOM`].
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(MAX_ZOOM);
    }

    /// Zoom out one step, floored at [`MIN_ZOOM`].
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
    }
}
