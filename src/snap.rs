//! Snapping helpers applied while a stroke is being drawn.
//!
//! Three independent snaps exist: a stroke start snaps onto the nearest
//! existing endpoint, a stroke end snaps its direction onto 45° (or, with the
//! ortho modifier, 90°) multiples, and with the ortho modifier the end also
//! aligns to the start axes of existing segments.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::camera::Point;
use crate::config::EngineConfig;
use crate::doc::Element;

/// Angular step between snap candidates in free drawing.
const FREE_STEP_DEG: f64 = 45.0;

/// Angular step between snap candidates with the ortho modifier held.
const ORTHO_STEP_DEG: f64 = 90.0;

/// An axis guide shown while drawing near another element's start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Guide {
    /// Vertical line at this x.
    Vertical(f64),
    /// Horizontal line at this y.
    Horizontal(f64),
}

/// Snap `point` onto the closest start or end point of any element strictly
/// within `tolerance`. Returns `point` unchanged when nothing is close enough.
#[must_use]
pub fn snap_to_endpoint(point: Point, elements: &[Element], tolerance: f64) -> Point {
    let mut best = point;
    let mut best_dist = f64::INFINITY;
    for candidate in elements.iter().flat_map(|e| [e.start, e.end]) {
        let dist = candidate.distance(point);
        if dist < tolerance && dist < best_dist {
            best_dist = dist;
            best = candidate;
        }
    }
    best
}

/// Snap the direction `start → end` onto the nearest angle candidate.
///
/// Candidates are multiples of 90° when `ortho` is set and multiples of 45°
/// otherwise; the matching threshold comes from `config`. The distance from
/// `start` is preserved. A zero-length stroke has no direction and is
/// returned unchanged, as is any stroke whose nearest candidate lies beyond
/// the threshold.
#[must_use]
pub fn snap_angle(start: Point, end: Point, ortho: bool, config: &EngineConfig) -> Point {
    let dist = start.distance(end);
    if dist == 0.0 {
        return end;
    }

    let (step, threshold) = if ortho {
        (ORTHO_STEP_DEG, config.ortho_snap_threshold_deg)
    } else {
        (FREE_STEP_DEG, config.angle_snap_threshold_deg)
    };

    let raw = start.angle_to(end);
    let nearest = (raw / step).round() * step;
    if (raw - nearest).abs() < threshold {
        start.offset_polar(nearest, dist)
    } else {
        end
    }
}

/// Align `end` with the start axes of existing segments.
///
/// x snaps to the closest segment `start.x` strictly within `tolerance`, and
/// y independently to the closest segment `start.y`. Labels are ignored.
#[must_use]
pub fn snap_to_axes(end: Point, elements: &[Element], tolerance: f64) -> Point {
    let mut snapped = end;
    let mut best_dx = tolerance;
    let mut best_dy = tolerance;
    for element in elements.iter().filter(|e| !e.kind.is_label()) {
        let dx = (element.start.x - end.x).abs();
        if dx < best_dx {
            best_dx = dx;
            snapped.x = element.start.x;
        }
        let dy = (element.start.y - end.y).abs();
        if dy < best_dy {
            best_dy = dy;
            snapped.y = element.start.y;
        }
    }
    snapped
}

/// Axis guides through every element start within `tolerance` of `point`.
#[must_use]
pub fn guides(point: Point, elements: &[Element], tolerance: f64) -> Vec<Guide> {
    let mut out = Vec::new();
    for element in elements {
        if (element.start.x - point.x).abs() < tolerance {
            out.push(Guide::Vertical(element.start.x));
        }
        if (element.start.y - point.y).abs() < tolerance {
            out.push(Guide::Horizontal(element.start.y));
        }
    }
    out
}
