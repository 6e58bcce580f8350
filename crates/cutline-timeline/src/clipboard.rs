//! Clipboard, split-at-playhead, and protected delete.
//!
//! Preconditions here are UI states, not errors: copy/split with anything
//! other than exactly one selected element, or a split point outside the
//! element, are silent no-ops.

use tracing::debug;

use crate::element::{Element, ElementBody, ElementId};
use crate::timeline::Timeline;

/// Holds deep copies of elements between copy and paste.
#[derive(Debug, Default)]
pub struct ClipboardEngine {
    buffer: Vec<Element>,
}

impl ClipboardEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Copy the single selected element into the buffer under a new ID.
    /// No timeline mutation. No-op unless exactly one element is selected.
    pub fn copy(&mut self, timeline: &Timeline, selection: &[ElementId]) {
        let [id] = selection else { return };
        let Some(element) = timeline.get(*id) else {
            return;
        };
        self.buffer = vec![element.duplicate()];
        debug!(element = %id, "copied element to clipboard");
    }

    /// Insert every buffered element as an independent copy with a fresh ID
    /// and a fresh priority. Repeated pastes of the same buffer yield
    /// distinct IDs with identical visual properties.
    pub fn paste(&self, timeline: &mut Timeline) -> Vec<ElementId> {
        self.buffer
            .iter()
            .map(|el| timeline.materialize(el.duplicate()))
            .collect()
    }
}

/// Split the single selected element at the playhead.
///
/// Dynamic elements cut the trim window: the original keeps the left half
/// (`trim.end` clamped to the cut), the clone takes the right half
/// (`trim.start` advanced to the cut): a shared boundary with no gap or
/// overlap. Static elements shrink the original to end at the cursor and the
/// clone becomes the right half. Returns the clone's ID; the caller moves
/// the selection there and checkpoints.
pub fn split_at(
    timeline: &mut Timeline,
    selection: &[ElementId],
    playhead_ms: i64,
) -> Option<ElementId> {
    let [id] = selection else { return None };
    let element = timeline.get(*id)?;

    // Strictly inside the visible span, or there is nothing to split.
    let (span_start, span_end) = timeline.effective_span(element).ok()?;
    if playhead_ms <= span_start || playhead_ms >= span_end {
        return None;
    }
    let offset = timeline.parent_offset(element).ok()?;

    let mut clone = element.duplicate();
    let element = timeline.get_mut(*id)?;

    match (&mut element.body, &mut clone.body) {
        (
            ElementBody::Dynamic { trim, .. },
            ElementBody::Dynamic {
                trim: clone_trim, ..
            },
        ) => {
            // Cut point as a source-relative offset.
            let cut = playhead_ms - offset - element.start_time;
            trim.end = cut;
            clone_trim.start = cut;
        }
        (ElementBody::Static { duration }, ElementBody::Static {
            duration: clone_duration,
        }) => {
            let local_cut = playhead_ms - offset;
            *clone_duration = element.start_time + *duration - local_cut;
            *duration = local_cut - element.start_time;
            clone.start_time = local_cut;
        }
        _ => return None,
    }

    let clone_id = timeline.materialize(clone);
    debug!(original = %id, clone = %clone_id, at = playhead_ms, "split element");
    Some(clone_id)
}

/// Delete the selected elements, skipping protected ones. An element
/// referenced as the parent of a live text child cannot be deleted while
/// that child exists. Returns the IDs actually removed.
pub fn delete(timeline: &mut Timeline, selection: &[ElementId]) -> Vec<ElementId> {
    let mut removed = Vec::new();
    for id in selection {
        if timeline.has_text_children(*id) {
            debug!(element = %id, "delete skipped: element has live text children");
            continue;
        }
        if timeline.remove(*id).is_some() {
            removed.push(*id);
        }
    }
    removed
}
