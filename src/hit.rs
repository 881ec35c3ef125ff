#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::TAG_RADIUS_PX;
use crate::doc::{Element, ElementId};

/// Return the first element (in draw order) whose grab handle is under `world_pt`.
///
/// Segments are grabbed by the tag bubble at their midpoint, labels by their
/// anchor. The bubble radius is fixed in screen pixels, so it shrinks in
/// surface units as the camera zooms in.
#[must_use]
pub fn hit_test(world_pt: Point, elements: &[Element], camera: &Camera) -> Option<ElementId> {
    let radius = camera.screen_dist_to_world(TAG_RADIUS_PX);
    elements
        .iter()
        .find(|e| e.handle_point().distance(world_pt) <= radius)
        .map(|e| e.id)
}
