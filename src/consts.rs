//! Shared numeric constants for the floor-plan engine.

// ── Geometry ────────────────────────────────────────────────────

/// Drawing-surface pixels per meter at zoom 1.0.
pub const PIXELS_PER_METER: f64 = 10.0;

// ── Snapping ────────────────────────────────────────────────────

/// Distance within which a stroke start snaps to an existing endpoint, and an
/// ortho stroke end snaps to another element's start axis.
pub const SNAP_TOLERANCE: f64 = 15.0;

/// Angle-snap threshold in degrees when drawing freely (45° candidates).
pub const ANGLE_SNAP_THRESHOLD_DEG: f64 = 5.0;

/// Angle-snap threshold in degrees while the ortho modifier is held (90° candidates).
pub const ORTHO_SNAP_THRESHOLD_DEG: f64 = 20.0;

// ── Tags ────────────────────────────────────────────────────────

/// Longest tag the sequence will produce (26^6 distinct tags).
pub const MAX_TAG_LEN: usize = 6;

/// Screen-space radius of the tag bubble drawn at an element midpoint.
pub const TAG_RADIUS_PX: f64 = 10.0;

// ── Strokes ─────────────────────────────────────────────────────

/// Stroke width of wall lines in screen pixels.
pub const LINE_WIDTH_PX: f64 = 3.0;

/// Stroke width of doors in screen pixels.
pub const DOOR_WIDTH_PX: f64 = 5.0;

/// Stroke width of windows in screen pixels.
pub const WINDOW_WIDTH_PX: f64 = 5.0;

/// Font size of label text in screen pixels.
pub const LABEL_FONT_PX: f64 = 14.0;

/// Font size of tag text inside a bubble, in screen pixels.
pub const TAG_FONT_PX: f64 = 12.0;

// ── Surface ─────────────────────────────────────────────────────

/// Backing-store multiplier of the drawing surface and the export raster.
pub const SURFACE_SCALE: f64 = 2.0;

/// Zoom step applied by one zoom-in / zoom-out.
pub const ZOOM_STEP: f64 = 1.1;

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.5;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 5.0;
