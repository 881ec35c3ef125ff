#![allow(clippy::float_cmp)]

use super::*;

use crate::camera::Point;

fn element(kind: ElementKind, consistent: bool) -> Element {
    let mut e = Element::new(kind, Point::new(0.0, 0.0), "A");
    e.is_consistent = consistent;
    e
}

// =============================================================
// ExportFormat
// =============================================================

#[test]
fn format_extensions_and_mime() {
    assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
    assert_eq!(ExportFormat::Png.extension(), "png");
    assert_eq!(ExportFormat::Jpeg.mime_type(), "image/jpeg");
    assert_eq!(ExportFormat::Png.mime_type(), "image/png");
}

#[test]
fn only_jpeg_has_background() {
    assert_eq!(ExportFormat::Jpeg.background(), Some("white"));
    assert_eq!(ExportFormat::Png.background(), None);
}

// =============================================================
// file_name
// =============================================================

#[test]
fn file_name_uses_plan_name() {
    assert_eq!(file_name(Some("Floor plan 1"), ExportFormat::Png), "Floor plan 1.png");
    assert_eq!(file_name(Some("Loft"), ExportFormat::Jpeg), "Loft.jpg");
}

#[test]
fn file_name_falls_back_without_plan() {
    assert_eq!(file_name(None, ExportFormat::Png), "floor-plan.png");
    assert_eq!(file_name(Some("   "), ExportFormat::Jpeg), "floor-plan.jpg");
}

#[test]
fn file_name_trims_whitespace() {
    assert_eq!(file_name(Some("  Loft "), ExportFormat::Png), "Loft.png");
}

#[test]
fn surface_scale_doubles_zoom() {
    assert_eq!(surface_scale(1.0), 2.0);
    assert_eq!(surface_scale(0.5), 1.0);
}

// =============================================================
// Strokes
// =============================================================

#[test]
fn export_strokes_per_kind() {
    assert_eq!(export_stroke(ElementKind::Line), Some(StrokeStyle { color: "black", width_px: 3.0 }));
    assert_eq!(export_stroke(ElementKind::Door), Some(StrokeStyle { color: "brown", width_px: 5.0 }));
    assert_eq!(export_stroke(ElementKind::Window), Some(StrokeStyle { color: "gray", width_px: 5.0 }));
    assert_eq!(export_stroke(ElementKind::Label), None);
}

#[test]
fn live_view_marks_inconsistent_walls_red() {
    let style = live_stroke(&element(ElementKind::Line, false)).unwrap();
    assert_eq!(style.color, "red");
    assert_eq!(style.width_px, 3.0);
}

#[test]
fn live_view_keeps_consistent_walls_black() {
    assert_eq!(live_stroke(&element(ElementKind::Line, true)).unwrap().color, "black");
}

#[test]
fn live_view_does_not_recolor_openings() {
    assert_eq!(live_stroke(&element(ElementKind::Door, false)).unwrap().color, "brown");
    assert_eq!(live_stroke(&element(ElementKind::Window, false)).unwrap().color, "gray");
    assert_eq!(live_stroke(&element(ElementKind::Label, false)), None);
}
