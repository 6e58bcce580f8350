//! Timeline canvas: ruler, track lanes, clips, highlights, keyframe
//! panels, playhead, and project-end marker.
//!
//! The frame is fully regenerated on every call, with no incremental diff.
//! Elements are drawn from a fresh priority-sorted snapshot, never by
//! iterating the live map in place. Previews come from the asset loader;
//! a cache miss requests a load and draws nothing for that clip this
//! frame, and the loader's completion callback schedules the next pass.

use cutline_timeline::{Element, FileType};
use egui::{self, Color32, Pos2, Rect, Rounding, Stroke, Vec2};
use tracing::warn;

use crate::editor::TimelineEditor;
use crate::layout::{element_rect, ViewState, KEYFRAME_ROW_HEIGHT, ROW_HEIGHT, RULER_HEIGHT};
use crate::theme::Theme;

/// Draw the timeline and feed pointer/keyboard input to the editor.
pub fn show_timeline(ui: &mut egui::Ui, editor: &mut TimelineEditor) -> egui::Response {
    let available = ui.available_size();
    let (response, painter) =
        ui.allocate_painter(available, egui::Sense::click_and_drag());
    let rect = response.rect;
    let tracks_top = rect.top() + RULER_HEIGHT;

    let timeline = editor.store().borrow().timeline();
    let view = editor.view;
    let mapper = view.mapper();

    // Screen → content (scroll-adjusted, y from track 0).
    let to_content = |pos: Pos2| {
        Pos2::new(
            pos.x - rect.left() + view.scroll.x,
            pos.y - tracks_top + view.scroll.y,
        )
    };
    // Content → screen.
    let to_screen = Vec2::new(
        rect.left() - view.scroll.x,
        tracks_top - view.scroll.y,
    );

    // ── Input ──────────────────────────────────────────────────
    handle_input(ui, editor, &response, tracks_top, to_content);

    // Re-read after input: the handlers patch the store.
    let timeline = if editor.take_repaint() {
        ui.ctx().request_repaint();
        editor.store().borrow().timeline()
    } else {
        timeline
    };

    // ── Background + ruler ─────────────────────────────────────
    painter.rect_filled(rect, 0.0, Theme::bg());
    let ruler_rect = Rect::from_min_size(rect.min, Vec2::new(rect.width(), RULER_HEIGHT));
    draw_ruler(&painter, ruler_rect, &view);

    // ── Track lanes ────────────────────────────────────────────
    let rows = timeline.row_count();
    for row in 0..rows {
        let lane_top = tracks_top + row as f32 * ROW_HEIGHT - view.scroll.y;
        let lane_rect = Rect::from_min_size(
            Pos2::new(rect.left(), lane_top),
            Vec2::new(rect.width(), ROW_HEIGHT),
        );
        if row % 2 == 0 {
            painter.rect_filled(lane_rect, 0.0, Theme::lane_even());
        }
        painter.line_segment(
            [
                Pos2::new(lane_rect.left(), lane_rect.bottom()),
                Pos2::new(lane_rect.right(), lane_rect.bottom()),
            ],
            Stroke::new(Theme::STROKE_SUBTLE, Theme::lane_border()),
        );
    }

    // ── Clips, in paint order ──────────────────────────────────
    let selection = editor.selection();
    let selected: Vec<_> = selection.ids().to_vec();
    let guide_on_target = editor.guide_active();

    for element in timeline.by_priority() {
        let content_rect = match element_rect(&timeline, element, &mapper) {
            Ok(r) => r,
            Err(e) => {
                // A malformed element must not abort the frame.
                warn!(element = %element.id, error = %e, "skipping element during render");
                continue;
            }
        };
        let clip_rect = content_rect.translate(to_screen);
        if clip_rect.right() < rect.left() || clip_rect.left() > rect.right() {
            continue;
        }

        let is_selected = selected.contains(&element.id);
        draw_clip(&painter, editor, element, clip_rect, is_selected, guide_on_target);

        if let Some(animation) = &element.animation {
            draw_keyframe_panels(&painter, &mapper, element, animation, clip_rect, to_screen);
        }
    }

    // ── Playhead ───────────────────────────────────────────────
    let playhead_x = rect.left() + mapper.ms_to_px_f(view.playhead_ms) - view.scroll.x;
    if playhead_x >= rect.left() && playhead_x <= rect.right() {
        let tri = egui::epaint::PathShape::convex_polygon(
            vec![
                Pos2::new(playhead_x - 5.0, ruler_rect.bottom() - 6.0),
                Pos2::new(playhead_x + 5.0, ruler_rect.bottom() - 6.0),
                Pos2::new(playhead_x, ruler_rect.bottom()),
            ],
            Theme::playhead(),
            Stroke::NONE,
        );
        painter.add(tri);
        painter.line_segment(
            [
                Pos2::new(playhead_x, ruler_rect.bottom()),
                Pos2::new(playhead_x, rect.bottom()),
            ],
            Stroke::new(Theme::STROKE_SELECTION, Theme::playhead()),
        );
    }

    // ── Project end marker ─────────────────────────────────────
    let end_ms = (editor.options().project_duration_secs() * 1000.0) as i64;
    let end_x = rect.left() + mapper.ms_to_px_f(end_ms) - view.scroll.x;
    if end_x >= rect.left() && end_x <= rect.right() {
        painter.line_segment(
            [
                Pos2::new(end_x, ruler_rect.bottom()),
                Pos2::new(end_x, rect.bottom()),
            ],
            Stroke::new(Theme::STROKE_EMPHASIS, Theme::end_marker()),
        );
    }

    response
}

fn handle_input(
    ui: &egui::Ui,
    editor: &mut TimelineEditor,
    response: &egui::Response,
    tracks_top: f32,
    to_content: impl Fn(Pos2) -> Pos2,
) {
    // Cursor icon tracks the hit under the hover position.
    if let Some(hover) = response.hover_pos() {
        if hover.y >= tracks_top {
            let icon = editor.on_pointer_move(to_content(hover));
            ui.ctx().set_cursor_icon(icon);
        }
    }

    let shift = ui.input(|i| i.modifiers.shift);

    if response.clicked() || response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            if pos.y < tracks_top {
                // Ruler: seek the playhead.
                let content = to_content(pos);
                editor.view.playhead_ms = editor.mapper().px_f_to_ms(content.x).max(0);
            } else {
                editor.on_pointer_down(to_content(pos), shift);
            }
        }
    }
    if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            if editor.is_dragging() {
                editor.on_pointer_drag(to_content(pos));
            } else if pos.y < tracks_top {
                // Scrub.
                let content = to_content(pos);
                editor.view.playhead_ms = editor.mapper().px_f_to_ms(content.x).max(0);
            }
        }
    }
    if response.clicked() || response.drag_stopped() {
        editor.on_pointer_up();
    }

    ui.input(|i| {
        if i.key_pressed(egui::Key::Escape) {
            editor.cancel_drag();
        }
        if i.key_pressed(egui::Key::ArrowUp) {
            editor.raise_selection();
        }
        if i.key_pressed(egui::Key::ArrowDown) {
            editor.lower_selection();
        }
        if i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace) {
            editor.delete_selection();
        }
    });
}

fn draw_clip(
    painter: &egui::Painter,
    editor: &TimelineEditor,
    element: &Element,
    clip_rect: Rect,
    is_selected: bool,
    guide_active: bool,
) {
    let color = Theme::element_color(element.color);

    painter.rect_filled(
        clip_rect,
        Rounding::same(Theme::RADIUS),
        Theme::with_alpha(color, 40),
    );

    // Preview from the loader; on a miss, request and draw nothing this
    // frame; the completion notification redraws.
    if let Some(texture) = preview_texture(editor, element) {
        painter.image(
            texture,
            clip_rect.shrink(1.0),
            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );
    }

    let outline = if guide_active && is_selected {
        Stroke::new(Theme::STROKE_EMPHASIS, Theme::guide())
    } else {
        Stroke::new(Theme::STROKE_EMPHASIS, Theme::with_alpha(color, 160))
    };
    painter.rect_stroke(clip_rect, Rounding::same(Theme::RADIUS), outline);

    // Selection highlight on all four sides.
    if is_selected {
        let r = clip_rect.expand(1.0);
        let stroke = Stroke::new(Theme::STROKE_SELECTION, Theme::selection());
        painter.line_segment([r.left_top(), r.right_top()], stroke);
        painter.line_segment([r.right_top(), r.right_bottom()], stroke);
        painter.line_segment([r.right_bottom(), r.left_bottom()], stroke);
        painter.line_segment([r.left_bottom(), r.left_top()], stroke);
    }

    // Label once there is room.
    if clip_rect.width() > 30.0 {
        painter.text(
            Pos2::new(clip_rect.left() + 6.0, clip_rect.center().y),
            egui::Align2::LEFT_CENTER,
            &element.name,
            egui::FontId::proportional(Theme::FONT_XS),
            Theme::t1(),
        );
    }
}

fn preview_texture(editor: &TimelineEditor, element: &Element) -> Option<egui::TextureId> {
    let assets = editor.assets();
    match element.filetype {
        FileType::Image => {
            let path = element.source_path.as_deref()?;
            let cached = assets.borrow().image(path);
            match cached {
                Some(texture) => Some(texture),
                None => {
                    assets.borrow_mut().request_image(path);
                    None
                }
            }
        }
        FileType::Gif => {
            let path = element.source_path.as_deref()?;
            let cached = assets.borrow().gif(path);
            match cached {
                Some(frames) => frames.first().copied(),
                None => {
                    assets.borrow_mut().request_gif(path);
                    None
                }
            }
        }
        FileType::Video | FileType::Audio => {
            let cached = assets.borrow().element_video(element.id);
            match cached {
                Some(texture) => Some(texture),
                None => {
                    assets
                        .borrow_mut()
                        .request_element_video(element.id, element);
                    None
                }
            }
        }
        FileType::Text | FileType::Shape => None,
    }
}

fn draw_keyframe_panels(
    painter: &egui::Painter,
    mapper: &cutline_core::TimeMapper,
    element: &Element,
    animation: &cutline_core::Animation,
    clip_rect: Rect,
    to_screen: Vec2,
) {
    for (row, (_kind, offsets)) in animation.active_channels().iter().enumerate() {
        let top = clip_rect.bottom() + row as f32 * KEYFRAME_ROW_HEIGHT;
        let panel = Rect::from_min_size(
            Pos2::new(clip_rect.left(), top),
            Vec2::new(clip_rect.width(), KEYFRAME_ROW_HEIGHT - 1.0),
        );
        painter.rect_filled(panel, 0.0, Theme::lane_even());

        for offset in offsets {
            let x = mapper.ms_to_px_f(element.start_time + offset) + to_screen.x;
            let y = panel.center().y;
            let d = 2.5;
            let diamond = egui::epaint::PathShape::convex_polygon(
                vec![
                    Pos2::new(x, y - d),
                    Pos2::new(x + d, y),
                    Pos2::new(x, y + d),
                    Pos2::new(x - d, y),
                ],
                Theme::keyframe(),
                Stroke::NONE,
            );
            painter.add(diamond);
        }
    }
}

fn draw_ruler(painter: &egui::Painter, rect: Rect, view: &ViewState) {
    let mapper = view.mapper();
    painter.rect_filled(rect, 0.0, Theme::lane_even());
    painter.line_segment(
        [
            Pos2::new(rect.left(), rect.bottom()),
            Pos2::new(rect.right(), rect.bottom()),
        ],
        Stroke::new(Theme::STROKE_SUBTLE, Theme::lane_border()),
    );

    // One tick per second, labeled every five.
    let px_per_sec = mapper.ms_to_px_f(1000).max(1.0);
    let first = (view.scroll.x / px_per_sec).floor() as i64;
    let last = first + (rect.width() / px_per_sec) as i64 + 2;

    for tick in first.max(0)..last {
        let x = rect.left() + tick as f32 * px_per_sec - view.scroll.x;
        if x < rect.left() || x > rect.right() {
            continue;
        }
        let is_label = tick % 5 == 0;
        let height = if is_label { 10.0 } else { 5.0 };
        painter.line_segment(
            [
                Pos2::new(x, rect.bottom() - height),
                Pos2::new(x, rect.bottom()),
            ],
            Stroke::new(Theme::STROKE_SUBTLE, Theme::lane_border()),
        );
        if is_label {
            painter.text(
                Pos2::new(x + 2.0, rect.top() + 2.0),
                egui::Align2::LEFT_TOP,
                format!("{tick}s"),
                egui::FontId::monospace(Theme::FONT_XS),
                Theme::t3(),
            );
        }
    }
}
