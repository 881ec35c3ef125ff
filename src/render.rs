//! Rendering: draws the floor plan to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives read-only views of engine state and produces pixels; it does
//! not mutate any application state.
//!
//! Two passes exist. [`draw`] paints the live editing view: consistency
//! coloring, tag bubbles, the in-progress stroke, and axis guides.
//! [`draw_export`] paints only the plan itself for a downloadable raster.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{LABEL_FONT_PX, TAG_FONT_PX, TAG_RADIUS_PX};
use crate::doc::Element;
use crate::engine::Scene;
use crate::export::{self, ExportFormat, StrokeStyle};
use crate::snap::Guide;

/// Guide dash segment length in surface units.
const GUIDE_DASH: f64 = 5.0;

/// Guide stroke color.
const GUIDE_COLOR: &str = "rgba(0, 0, 255, 0.3)";

/// Draw the live scene.
///
/// `width_px` and `height_px` are the canvas backing-store size.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, scene: &Scene<'_>, width_px: f64, height_px: f64) -> Result<(), JsValue> {
    let zoom = scene.zoom;
    let scale = export::surface_scale(zoom);

    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, width_px, height_px);
    ctx.save();
    ctx.scale(scale, scale)?;

    for element in scene.elements {
        match export::live_stroke(element) {
            Some(style) => {
                draw_segment(ctx, element, style, zoom);
                let highlighted = scene.highlighted_tag == Some(element.tag.as_str());
                draw_tag_bubble(ctx, element, highlighted, zoom)?;
            }
            None => draw_label(ctx, element, zoom)?,
        }
    }

    if let Some(element) = scene.in_progress {
        if let Some(style) = export::export_stroke(element.kind) {
            draw_segment(ctx, element, style, zoom);
        }
        draw_guides(ctx, &scene.guides, width_px / scale, height_px / scale)?;
    }

    ctx.restore();
    Ok(())
}

/// Draw the plan for export: kind colors only, no tags, guides, or stroke in progress.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw_export(
    ctx: &CanvasRenderingContext2d,
    elements: &[Element],
    zoom: f64,
    format: ExportFormat,
    width_px: f64,
    height_px: f64,
) -> Result<(), JsValue> {
    if let Some(background) = format.background() {
        ctx.set_fill_style_str(background);
        ctx.fill_rect(0.0, 0.0, width_px, height_px);
    }

    let scale = export::surface_scale(zoom);
    ctx.save();
    ctx.scale(scale, scale)?;

    for element in elements {
        match export::export_stroke(element.kind) {
            Some(style) => draw_segment(ctx, element, style, zoom),
            None => draw_label(ctx, element, zoom)?,
        }
    }

    ctx.restore();
    Ok(())
}

// =============================================================
// Elements
// =============================================================

fn draw_segment(ctx: &CanvasRenderingContext2d, element: &Element, style: StrokeStyle, zoom: f64) {
    ctx.begin_path();
    ctx.move_to(element.start.x, element.start.y);
    ctx.line_to(element.end.x, element.end.y);
    ctx.set_stroke_style_str(style.color);
    ctx.set_line_width(style.width_px / zoom);
    ctx.set_line_cap("round");
    ctx.stroke();
}

fn draw_label(ctx: &CanvasRenderingContext2d, element: &Element, zoom: f64) -> Result<(), JsValue> {
    let Some(text) = element.text.as_deref() else {
        return Ok(());
    };
    ctx.set_fill_style_str("black");
    ctx.set_text_align("start");
    ctx.set_text_baseline("alphabetic");
    ctx.set_font(&format!("{}px Arial", LABEL_FONT_PX / zoom));
    ctx.fill_text(text, element.start.x, element.start.y)
}

fn draw_tag_bubble(
    ctx: &CanvasRenderingContext2d,
    element: &Element,
    highlighted: bool,
    zoom: f64,
) -> Result<(), JsValue> {
    let center = element.midpoint();

    ctx.begin_path();
    ctx.arc(center.x, center.y, TAG_RADIUS_PX / zoom, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str(if highlighted { "yellow" } else { "white" });
    ctx.fill();
    ctx.set_line_width(1.0 / zoom);
    ctx.stroke();

    ctx.set_fill_style_str("black");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("{}px Arial", TAG_FONT_PX / zoom));
    ctx.fill_text(&element.tag, center.x, center.y)
}

// =============================================================
// Guides
// =============================================================

fn draw_guides(ctx: &CanvasRenderingContext2d, guides: &[Guide], width: f64, height: f64) -> Result<(), JsValue> {
    if guides.is_empty() {
        return Ok(());
    }

    ctx.save();
    ctx.set_stroke_style_str(GUIDE_COLOR);
    ctx.set_line_width(1.0);
    let dash_array = js_sys::Array::new();
    dash_array.push(&GUIDE_DASH.into());
    dash_array.push(&GUIDE_DASH.into());
    ctx.set_line_dash(&dash_array)?;

    for guide in guides {
        ctx.begin_path();
        match *guide {
            Guide::Vertical(x) => {
                ctx.move_to(x, 0.0);
                ctx.line_to(x, height);
            }
            Guide::Horizontal(y) => {
                ctx.move_to(0.0, y);
                ctx.line_to(width, y);
            }
        }
        ctx.stroke();
    }

    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}
