//! Integration tests for the interaction engine: hit testing, drag,
//! snapping, and the editor shell wired to the in-memory store.

use std::cell::RefCell;
use std::rc::Rc;

use cutline_core::TimeMapper;
use cutline_timeline::{
    Element, ElementBody, ElementId, FileType, MemoryStore, Timeline, TimelineStore,
};
use cutline_ui::{
    hit_test, AssetLoader, FixedRenderOptions, HitKind, NullAssetLoader, RenderOptionsSource,
    TimelineEditor, ROW_HEIGHT,
};
use egui::Pos2;

// ── Helpers ────────────────────────────────────────────────────

// range 4 → 1px per 5ms, so the 10px tolerance is 50ms.
fn mapper() -> TimeMapper {
    TimeMapper::new(4.0)
}

fn image(start: i64, duration: i64) -> Element {
    let mut el = Element::new_static("img", FileType::Image, duration).unwrap();
    el.start_time = start;
    el
}

fn editor_with(elements: Vec<Element>) -> (TimelineEditor, Vec<ElementId>) {
    let mut timeline = Timeline::new();
    let ids: Vec<_> = elements
        .into_iter()
        .map(|el| timeline.materialize(el))
        .collect();
    let mut store = MemoryStore::default();
    store.patch_timeline(timeline);

    let store: Rc<RefCell<dyn TimelineStore>> = Rc::new(RefCell::new(store));
    let assets: Rc<RefCell<dyn AssetLoader>> = Rc::new(RefCell::new(NullAssetLoader::new()));
    let options: Rc<dyn RenderOptionsSource> = Rc::new(FixedRenderOptions::default());
    (TimelineEditor::new(store, assets, options), ids)
}

fn row_mid(track: u32) -> f32 {
    track as f32 * ROW_HEIGHT + ROW_HEIGHT / 2.0
}

fn timeline_of(editor: &TimelineEditor) -> Timeline {
    editor.store().borrow().timeline()
}

// ── Hit classification across the clip width ───────────────────

#[test]
fn body_points_hit_move_edges_hit_stretch() {
    let mut timeline = Timeline::new();
    // 0..2000ms → 0..400px.
    timeline.materialize(image(0, 2000));

    for x in [11i32, 50, 200, 350, 389] {
        let hit = hit_test(&timeline, &mapper(), Pos2::new(x as f32, row_mid(0))).unwrap();
        assert_eq!(hit.kind, HitKind::Move, "x={x} must be body");
    }
    for x in [-8i32, 0, 5, 10] {
        let hit = hit_test(&timeline, &mapper(), Pos2::new(x as f32, row_mid(0))).unwrap();
        assert_eq!(hit.kind, HitKind::StretchStart, "x={x} must be start edge");
    }
    for x in [390i32, 395, 400, 408] {
        let hit = hit_test(&timeline, &mapper(), Pos2::new(x as f32, row_mid(0))).unwrap();
        assert_eq!(hit.kind, HitKind::StretchEnd, "x={x} must be end edge");
    }
}

// ── Magnetic snapping ──────────────────────────────────────────

#[test]
fn drag_right_edge_near_neighbor_snaps_flush() {
    // A at 0..1000, B at 2000..3000. Dragging A right until its right edge
    // is within 10px of B's left edge must land A at exactly 1000.
    let (mut editor, ids) = editor_with(vec![image(0, 1000), image(2000, 1000)]);

    editor.on_pointer_down(Pos2::new(100.0, row_mid(0)), false);
    // +192px → +960ms: A's right edge sits 8px short of B's left edge.
    editor.on_pointer_drag(Pos2::new(292.0, row_mid(0)));

    assert!(editor.guide_active());
    assert_eq!(timeline_of(&editor).get(ids[0]).unwrap().start_time, 1000);

    editor.on_pointer_up();
    assert_eq!(timeline_of(&editor).get(ids[0]).unwrap().start_time, 1000);
}

#[test]
fn shift_selection_drags_both_without_snapping() {
    let (mut editor, ids) = editor_with(vec![
        image(0, 1000),
        image(5000, 1000),
        image(2000, 1000), // would-be snap candidate
    ]);

    // Select A, then shift-click B (1000..1200px on row 0 at 5000ms).
    editor.on_pointer_down(Pos2::new(100.0, row_mid(0)), false);
    editor.on_pointer_up();
    editor.on_pointer_down(Pos2::new(1100.0, row_mid(0)), true);
    editor.on_pointer_up();
    assert_eq!(editor.selection().len(), 2);

    // Re-arm on A (already selected: the set must survive) and drag.
    editor.on_pointer_down(Pos2::new(100.0, row_mid(0)), false);
    assert_eq!(editor.selection().len(), 2);
    editor.on_pointer_drag(Pos2::new(292.0, row_mid(0)));

    // Both moved by the raw 960ms; no guide fired.
    assert!(!editor.guide_active());
    assert_eq!(timeline_of(&editor).get(ids[0]).unwrap().start_time, 960);
    assert_eq!(timeline_of(&editor).get(ids[1]).unwrap().start_time, 5960);
}

// ── Trim invariants through the editor ─────────────────────────

#[test]
fn dynamic_trim_stays_inside_source_bounds() {
    let vid = Element::new_dynamic("vid", FileType::Video, "v.mp4", 10_000).unwrap();
    let (mut editor, ids) = editor_with(vec![vid]);

    // Grab the right edge (span 0..10000ms → 0..2000px).
    editor.on_pointer_down(Pos2::new(1998.0, row_mid(0)), false);
    assert!(editor.is_dragging());

    // A wild sweep of updates, left and right, far past both bounds.
    for x in [-5000.0, 3000.0, -1990.0, 500.0, 2500.0, -1998.0] {
        editor.on_pointer_drag(Pos2::new(x, row_mid(0)));

        let timeline = timeline_of(&editor);
        let ElementBody::Dynamic { trim, .. } = &timeline.get(ids[0]).unwrap().body else {
            panic!()
        };
        assert!(trim.start >= 0, "trim.start must stay non-negative");
        assert!(trim.start < trim.end, "trim window must stay ordered");
        assert!(trim.end <= 10_000, "trim.end must stay within the source");
    }
    editor.on_pointer_up();
}

#[test]
fn static_resize_never_drops_below_minimum() {
    let (mut editor, ids) = editor_with(vec![image(0, 1000)]);

    editor.on_pointer_down(Pos2::new(199.0, row_mid(0)), false);
    for x in [-400.0, 5.0, -100.0, 199.5, 2.0] {
        editor.on_pointer_drag(Pos2::new(x, row_mid(0)));
        let duration = timeline_of(&editor).get(ids[0]).unwrap().visible_duration();
        assert!(duration >= 10, "duration {duration} below minimum");
    }
}

// ── Gesture lifecycle ──────────────────────────────────────────

#[test]
fn pointer_up_always_disarms_the_gesture() {
    let (mut editor, _) = editor_with(vec![image(0, 1000)]);

    editor.on_pointer_down(Pos2::new(100.0, row_mid(0)), false);
    assert!(editor.is_dragging());
    editor.on_pointer_up();
    assert!(!editor.is_dragging());

    // A stray up with no gesture armed is harmless.
    editor.on_pointer_up();
    assert!(!editor.is_dragging());
}

#[test]
fn drag_preview_is_live_in_the_store() {
    let (mut editor, ids) = editor_with(vec![image(0, 1000)]);

    editor.on_pointer_down(Pos2::new(100.0, row_mid(0)), false);
    for (px, expected) in [(120.0, 100), (180.0, 400), (100.0, 0)] {
        editor.on_pointer_drag(Pos2::new(px, row_mid(0)));
        assert_eq!(
            timeline_of(&editor).get(ids[0]).unwrap().start_time,
            expected,
            "store must reflect each move"
        );
    }
}

#[test]
fn cross_track_drag_keeps_horizontal_independence() {
    let (mut editor, ids) = editor_with(vec![image(1000, 1000)]);

    editor.on_pointer_down(Pos2::new(300.0, row_mid(0)), false);
    // Right 100px and down two rows in one motion.
    editor.on_pointer_drag(Pos2::new(400.0, row_mid(0) + 2.0 * ROW_HEIGHT));

    let timeline = timeline_of(&editor);
    let el = timeline.get(ids[0]).unwrap();
    assert_eq!(el.start_time, 1500);
    assert_eq!(el.track, 2);
}

// ── Undo across interaction and clipboard ──────────────────────

#[test]
fn paste_then_undo_restores_element_count() {
    let (mut editor, _) = editor_with(vec![image(0, 1000)]);

    editor.on_pointer_down(Pos2::new(100.0, row_mid(0)), false);
    editor.on_pointer_up();

    editor.copy();
    editor.paste();
    editor.paste();
    assert_eq!(timeline_of(&editor).len(), 3);

    editor.undo();
    assert_eq!(timeline_of(&editor).len(), 2);
    editor.undo();
    assert_eq!(timeline_of(&editor).len(), 1);
    editor.redo();
    assert_eq!(timeline_of(&editor).len(), 2);
}
