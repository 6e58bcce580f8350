//! Dark theme for the timeline canvas.

use cutline_core::Rgba8;
use egui::Color32;

/// Central theme for the timeline widget.
pub struct Theme;

impl Theme {
    // ── Typography ─────────────────────────────────────────────
    pub const FONT_XS: f32 = 11.0; // clip labels, ruler ticks
    pub const FONT_SM: f32 = 13.0; // headers

    // ── Stroke widths ──────────────────────────────────────────
    pub const STROKE_SUBTLE: f32 = 0.5;
    pub const STROKE_EMPHASIS: f32 = 1.0;
    /// Selection highlight drawn on all four sides.
    pub const STROKE_SELECTION: f32 = 1.5;

    pub const RADIUS: f32 = 4.0;

    // ── Backgrounds ────────────────────────────────────────────
    pub const fn bg() -> Color32 {
        Color32::from_rgb(18, 18, 22)
    }
    pub const fn lane_even() -> Color32 {
        Color32::from_rgba_premultiplied(5, 5, 5, 5)
    }
    pub const fn lane_border() -> Color32 {
        Color32::from_rgba_premultiplied(10, 10, 10, 10)
    }

    // ── Text ───────────────────────────────────────────────────
    pub const fn t1() -> Color32 {
        Color32::from_rgba_premultiplied(235, 235, 235, 235)
    }
    pub const fn t3() -> Color32 {
        Color32::from_rgba_premultiplied(89, 89, 89, 89)
    }

    // ── Semantic colors ────────────────────────────────────────
    pub const fn selection() -> Color32 {
        Color32::from_rgb(86, 130, 255)
    }
    pub const fn playhead() -> Color32 {
        Color32::from_rgb(255, 88, 85)
    }
    pub const fn guide() -> Color32 {
        Color32::from_rgb(64, 210, 220)
    }
    pub const fn end_marker() -> Color32 {
        Color32::from_rgba_premultiplied(120, 120, 120, 180)
    }
    pub const fn keyframe() -> Color32 {
        Color32::from_rgb(255, 184, 48)
    }

    /// Apply an alpha to any color.
    pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
    }

    /// An element's display color as an egui color.
    pub fn element_color(color: Rgba8) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}
