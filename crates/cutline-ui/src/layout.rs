//! Canvas layout: where an element sits on screen.
//!
//! All rectangles are in content coordinates (unscrolled, y measured from
//! the top of track 0). The widget translates by the canvas origin and the
//! scroll offset at the edges; hit testing receives already scroll-adjusted
//! cursor positions.

use cutline_core::{Result, TimeMapper};
use cutline_timeline::{Element, Timeline};
use egui::{Pos2, Rect, Vec2};

/// Height of one track row.
pub const ROW_HEIGHT: f32 = 36.0;
/// Vertical inset of a clip within its row.
pub const CLIP_INSET_Y: f32 = 3.0;
/// Pixel tolerance shared by edge hit testing and snapping.
pub const EDGE_MARGIN: f32 = 10.0;
/// Height of the time ruler above the tracks.
pub const RULER_HEIGHT: f32 = 20.0;
/// Height of one keyframe sub-panel row beneath a clip.
pub const KEYFRAME_ROW_HEIGHT: f32 = 7.0;

/// Zoom, scroll, and playhead for the canvas. The zoom level feeds the
/// mapper; everything else reads time through it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Zoom level (the mapper's `range`).
    pub range: f64,
    /// Scroll offset in px.
    pub scroll: Vec2,
    /// Playhead position, absolute ms.
    pub playhead_ms: i64,
}

impl ViewState {
    pub fn mapper(&self) -> TimeMapper {
        TimeMapper::new(self.range)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            range: 4.0,
            scroll: Vec2::ZERO,
            playhead_ms: 0,
        }
    }
}

/// Screen rectangle of an element in content coordinates.
///
/// Fails when the element's geometry cannot be resolved (text child with a
/// missing parent); callers skip such elements and keep going.
pub fn element_rect(timeline: &Timeline, element: &Element, mapper: &TimeMapper) -> Result<Rect> {
    let (start_ms, end_ms) = timeline.effective_span(element)?;
    let x0 = mapper.ms_to_px_f(start_ms);
    let x1 = mapper.ms_to_px_f(end_ms);
    let y = element.track as f32 * ROW_HEIGHT + CLIP_INSET_Y;
    Ok(Rect::from_min_max(
        Pos2::new(x0, y),
        Pos2::new(x1, y + ROW_HEIGHT - 2.0 * CLIP_INSET_Y),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutline_timeline::{ElementBody, FileType, ParentKey, TrimWindow};

    #[test]
    fn test_static_rect_at_unit_zoom() {
        let mut timeline = Timeline::new();
        let mut el = Element::new_static("img", FileType::Image, 1000).unwrap();
        el.start_time = 500;
        el.track = 2;
        let id = timeline.materialize(el);

        // range 4 → 1px per 5ms
        let mapper = TimeMapper::new(4.0);
        let rect = element_rect(&timeline, timeline.get(id).unwrap(), &mapper).unwrap();
        assert_eq!(rect.left(), 100.0);
        assert_eq!(rect.right(), 300.0);
        assert_eq!(rect.top(), 2.0 * ROW_HEIGHT + CLIP_INSET_Y);
    }

    #[test]
    fn test_dynamic_rect_includes_trim_offset() {
        let mut timeline = Timeline::new();
        let mut el = Element::new_dynamic("vid", FileType::Video, "v.mp4", 10_000).unwrap();
        el.start_time = 0;
        if let ElementBody::Dynamic { trim, .. } = &mut el.body {
            *trim = TrimWindow::new(1000, 3000);
        }
        let id = timeline.materialize(el);

        let mapper = TimeMapper::new(4.0);
        let rect = element_rect(&timeline, timeline.get(id).unwrap(), &mapper).unwrap();
        assert_eq!(rect.left(), 200.0);
        assert_eq!(rect.right(), 600.0);
    }

    #[test]
    fn test_missing_parent_fails_geometry() {
        let mut timeline = Timeline::new();
        let mut el = Element::new_static("caption", FileType::Text, 1000).unwrap();
        el.parent = ParentKey::Element(uuid::Uuid::new_v4());
        let id = timeline.materialize(el);

        let mapper = TimeMapper::new(4.0);
        assert!(element_rect(&timeline, timeline.get(id).unwrap(), &mapper).is_err());
    }
}
