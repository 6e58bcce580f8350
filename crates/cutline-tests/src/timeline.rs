//! Integration tests for the timeline data model: documents, stores,
//! clipboard flows, and serialization.

use cutline_timeline::{
    clipboard, ClipboardEngine, Document, DocumentFile, Element, ElementBody, FileType,
    MemoryStore, ParentKey, RollbackDirection, Timeline, TimelineStore, TrimWindow,
};

// ── Helpers ────────────────────────────────────────────────────

fn image(name: &str, start: i64, duration: i64) -> Element {
    let mut el = Element::new_static(name, FileType::Image, duration).unwrap();
    el.start_time = start;
    el
}

fn video(name: &str, start: i64, source_ms: i64) -> Element {
    let mut el = Element::new_dynamic(name, FileType::Video, "media/test.mp4", source_ms).unwrap();
    el.start_time = start;
    el
}

fn build_timeline() -> Timeline {
    let mut timeline = Timeline::new();
    timeline.materialize(image("Title", 0, 3000));
    timeline.materialize(video("Interview", 1000, 30_000));
    let mut music = Element::new_dynamic("Music", FileType::Audio, "media/bed.mp3", 45_000).unwrap();
    music.track = 2;
    timeline.materialize(music);
    timeline
}

// ── Priorities & rows ──────────────────────────────────────────

#[test]
fn materialization_order_is_paint_order() {
    let timeline = build_timeline();
    let names: Vec<_> = timeline.by_priority().iter().map(|e| e.name.clone()).collect();
    assert_eq!(names, vec!["Title", "Interview", "Music"]);
}

#[test]
fn repeated_paste_priorities_strictly_increase() {
    let mut timeline = build_timeline();
    let first = timeline.by_priority()[0].id;

    let mut clipboard = ClipboardEngine::new();
    clipboard.copy(&timeline, &[first]);
    for _ in 0..4 {
        clipboard.paste(&mut timeline);
    }

    let priorities: Vec<_> = timeline.by_priority().iter().map(|e| e.priority).collect();
    assert_eq!(priorities.len(), 7);
    assert!(priorities.windows(2).all(|w| w[0] < w[1]));
}

// ── Split contract ─────────────────────────────────────────────

#[test]
fn dynamic_split_produces_adjacent_trims() {
    let mut timeline = Timeline::new();
    let id = timeline.materialize(video("Clip", 0, 10_000));

    let clone = clipboard::split_at(&mut timeline, &[id], 4000).unwrap();

    let (ElementBody::Dynamic { trim: left, .. }, ElementBody::Dynamic { trim: right, .. }) = (
        &timeline.get(id).unwrap().body,
        &timeline.get(clone).unwrap().body,
    ) else {
        panic!("expected dynamic halves");
    };
    assert_eq!((left.start, left.end), (0, 4000));
    assert_eq!((right.start, right.end), (4000, 10_000));
}

#[test]
fn split_respects_preexisting_trim() {
    let mut timeline = Timeline::new();
    let mut clip = video("Clip", 1000, 20_000);
    if let ElementBody::Dynamic { trim, .. } = &mut clip.body {
        *trim = TrimWindow::new(2000, 8000);
    }
    let id = timeline.materialize(clip);

    // Visible span is 3000..9000; cut in the middle.
    let clone = clipboard::split_at(&mut timeline, &[id], 6000).unwrap();

    let (ElementBody::Dynamic { trim: left, .. }, ElementBody::Dynamic { trim: right, .. }) = (
        &timeline.get(id).unwrap().body,
        &timeline.get(clone).unwrap().body,
    ) else {
        panic!("expected dynamic halves");
    };
    assert_eq!((left.start, left.end), (2000, 5000));
    assert_eq!((right.start, right.end), (5000, 8000));
    assert_eq!(
        timeline.get(id).unwrap().span_end(),
        timeline.get(clone).unwrap().span_start()
    );
}

// ── Store history ──────────────────────────────────────────────

#[test]
fn checkpointed_split_rolls_back_and_forward() {
    let mut store = MemoryStore::default();
    store.patch_timeline(build_timeline());
    let before = store.timeline();
    let target = before.by_priority()[1].id;

    let mut working = store.timeline();
    let clone = clipboard::split_at(&mut working, &[target], 5000).unwrap();
    store.checkpoint_timeline();
    store.patch_timeline(working);
    assert_eq!(store.timeline().len(), 4);

    store.rollback(RollbackDirection::Back);
    assert_eq!(store.timeline().len(), 3);
    assert!(!store.timeline().contains(clone));

    store.rollback(RollbackDirection::Forward);
    assert_eq!(store.timeline().len(), 4);
    assert!(store.timeline().contains(clone));
}

#[test]
fn store_broadcasts_every_replacement() {
    use std::cell::Cell;
    use std::rc::Rc;

    let mut store = MemoryStore::default();
    let notified = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&notified);
    store.subscribe(Box::new(move |_| counter.set(counter.get() + 1)));

    store.patch_timeline(build_timeline());
    store.checkpoint_timeline(); // checkpoint alone does not broadcast
    store.rollback(RollbackDirection::Back);
    assert_eq!(notified.get(), 2);
}

// ── Protected delete ───────────────────────────────────────────

#[test]
fn text_child_protects_parent_until_removed() {
    let mut timeline = Timeline::new();
    let parent = timeline.materialize(video("Host", 0, 10_000));
    let mut caption = Element::new_static("Lower third", FileType::Text, 2000).unwrap();
    caption.parent = ParentKey::Element(parent);
    let caption_id = timeline.materialize(caption);

    assert!(clipboard::delete(&mut timeline, &[parent]).is_empty());
    assert_eq!(clipboard::delete(&mut timeline, &[caption_id, parent]).len(), 2);
    assert!(timeline.is_empty());
}

// ── Serialization ──────────────────────────────────────────────

#[test]
fn document_roundtrips_through_json() {
    let mut document = Document::new("Promo cut");
    document.timeline = build_timeline();
    let original_len = document.timeline.len();

    let file = DocumentFile::new(document);
    let bytes = file.to_json().unwrap();
    let loaded = DocumentFile::from_json(&bytes).unwrap();

    assert_eq!(loaded.document.name, "Promo cut");
    assert_eq!(loaded.document.timeline.len(), original_len);

    // Paint order survives the round trip.
    let names: Vec<_> = loaded
        .document
        .timeline
        .by_priority()
        .iter()
        .map(|e| e.name.clone())
        .collect();
    assert_eq!(names, vec!["Title", "Interview", "Music"]);
}

#[test]
fn loaded_document_replaces_store_state_wholesale() {
    let mut store = MemoryStore::default();
    store.patch_timeline(build_timeline());
    store.checkpoint_timeline();
    store.patch_timeline(Timeline::new());

    let mut document = Document::new("Other");
    document.timeline = build_timeline();
    store.load(document.timeline);

    // Load drops history: there is nothing to roll back to.
    assert!(!store.can_undo());
    store.rollback(RollbackDirection::Back);
    assert_eq!(store.timeline().len(), 3);
}

#[test]
fn delete_order_does_not_leak_children() {
    // Deleting parent and child in one selection works regardless of
    // iteration order when the child comes first.
    let mut timeline = Timeline::new();
    let parent = timeline.materialize(image("bg", 0, 5000));
    let mut caption = Element::new_static("caption", FileType::Text, 1000).unwrap();
    caption.parent = ParentKey::Element(parent);
    let child = timeline.materialize(caption);

    let removed = clipboard::delete(&mut timeline, &[child, parent]);
    assert_eq!(removed, vec![child, parent]);
    assert!(timeline.is_empty());
}
