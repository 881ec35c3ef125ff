//! Export formats and the drawing styles shared by the live view and the raster export.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DOOR_WIDTH_PX, LINE_WIDTH_PX, SURFACE_SCALE, WINDOW_WIDTH_PX};
use crate::doc::{Element, ElementKind};

/// File stem used when no floor plan is current.
pub const DEFAULT_EXPORT_NAME: &str = "floor-plan";

/// Raster format of an exported plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// JPEG on an opaque white background.
    Jpeg,
    /// PNG with a transparent background.
    Png,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Fill painted under the plan, or `None` to leave it transparent.
    #[must_use]
    pub fn background(self) -> Option<&'static str> {
        match self {
            Self::Jpeg => Some("white"),
            Self::Png => None,
        }
    }
}

/// A finished export, ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportImage {
    /// Suggested download name, e.g. `Floor plan 1.png`.
    pub file_name: String,
    /// `data:` URL holding the encoded raster.
    pub data_url: String,
}

/// Download name for a plan export. Blank or missing names fall back to
/// [`DEFAULT_EXPORT_NAME`].
#[must_use]
pub fn file_name(plan_name: Option<&str>, format: ExportFormat) -> String {
    let stem = plan_name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or(DEFAULT_EXPORT_NAME);
    format!("{stem}.{}", format.extension())
}

/// Scale applied to surface coordinates when drawing at `zoom`.
#[must_use]
pub fn surface_scale(zoom: f64) -> f64 {
    zoom * SURFACE_SCALE
}

/// Stroke color and width for one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// CSS color.
    pub color: &'static str,
    /// Width in screen pixels; divide by zoom for surface units.
    pub width_px: f64,
}

/// Stroke used in exports: fixed per kind, no consistency coloring.
/// Labels are text and have no stroke.
#[must_use]
pub fn export_stroke(kind: ElementKind) -> Option<StrokeStyle> {
    match kind {
        ElementKind::Line => Some(StrokeStyle { color: "black", width_px: LINE_WIDTH_PX }),
        ElementKind::Door => Some(StrokeStyle { color: "brown", width_px: DOOR_WIDTH_PX }),
        ElementKind::Window => Some(StrokeStyle { color: "gray", width_px: WINDOW_WIDTH_PX }),
        ElementKind::Label => None,
    }
}

/// Stroke used in the live view: walls whose length diverged from their
/// geometry are drawn red.
#[must_use]
pub fn live_stroke(element: &Element) -> Option<StrokeStyle> {
    let style = export_stroke(element.kind)?;
    if element.kind == ElementKind::Line && !element.is_consistent {
        return Some(StrokeStyle { color: "red", ..style });
    }
    Some(style)
}
