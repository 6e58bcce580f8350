//! Drag/resize engine.
//!
//! A gesture snapshots every selected element at mouse-down and recomputes
//! position, duration, trim, and track from those origins plus the mouse
//! delta on every move. Origins are never re-read live during the gesture;
//! a snapshot that goes missing mid-drag is regenerated defensively.

use std::collections::HashMap;

use cutline_core::{TimeMapper, MIN_ELEMENT_DURATION_MS};
use cutline_timeline::{Element, ElementBody, ElementId, Timeline, TrimWindow};
use egui::Pos2;
use tracing::warn;

use crate::hit_test::{Hit, HitKind};
use crate::layout::ROW_HEIGHT;
use crate::selection::{GuideMode, SelectionModel};
use crate::snapping::snap_to_neighbors;

/// Per-element state captured at mouse-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    pub start_time: i64,
    pub track: u32,
    pub body: OriginBody,
}

/// The variant-specific half of an origin snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OriginBody {
    Static {
        duration: i64,
    },
    Dynamic {
        trim: TrimWindow,
        speed: f64,
        source_duration: i64,
    },
}

impl DragOrigin {
    pub fn capture(element: &Element) -> Self {
        let body = match &element.body {
            ElementBody::Static { duration } => OriginBody::Static {
                duration: *duration,
            },
            ElementBody::Dynamic {
                trim,
                speed,
                source_duration,
            } => OriginBody::Dynamic {
                trim: *trim,
                speed: *speed,
                source_duration: *source_duration,
            },
        };
        Self {
            start_time: element.start_time,
            track: element.track,
            body,
        }
    }

    fn matches(&self, element: &Element) -> bool {
        matches!(
            (&self.body, &element.body),
            (OriginBody::Static { .. }, ElementBody::Static { .. })
                | (OriginBody::Dynamic { .. }, ElementBody::Dynamic { .. })
        )
    }
}

/// One mouse-down→mouse-up interaction. Owned by the editor; dropped (or
/// cancelled) on pointer-up no matter how the handlers exit.
#[derive(Debug)]
pub struct DragGesture {
    kind: HitKind,
    /// The hit element; drives snapping.
    target: ElementId,
    anchor: Pos2,
    /// Captured at gesture start; `MoveNotGuide` suppresses snapping.
    mode: GuideMode,
    origins: HashMap<ElementId, DragOrigin>,
    guide_active: bool,
}

impl DragGesture {
    /// Snapshot the selection and arm the gesture.
    pub fn begin(
        timeline: &Timeline,
        selection: &SelectionModel,
        hit: Hit,
        anchor: Pos2,
    ) -> Self {
        let origins = selection
            .ids()
            .iter()
            .filter_map(|id| timeline.get(*id).map(|el| (*id, DragOrigin::capture(el))))
            .collect();
        Self {
            kind: hit.kind,
            target: hit.id,
            anchor,
            mode: selection.mode(),
            origins,
            guide_active: false,
        }
    }

    pub fn kind(&self) -> HitKind {
        self.kind
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    /// Whether the last update landed on a guide. Visual feedback only.
    pub fn guide_active(&self) -> bool {
        self.guide_active
    }

    /// Recompute every selected element from its origin plus the current
    /// mouse position, writing accepted changes straight into the timeline
    /// (live preview).
    pub fn update(
        &mut self,
        timeline: &mut Timeline,
        mapper: &TimeMapper,
        selection: &[ElementId],
        pos: Pos2,
    ) {
        let dms = mapper.px_f_to_ms(pos.x - self.anchor.x);
        let row_delta = ((pos.y - self.anchor.y) / ROW_HEIGHT).round() as i64;
        self.guide_active = false;

        for id in selection {
            let Some(element) = timeline.get(*id) else {
                continue;
            };
            let origin = match self.origins.get(id) {
                Some(origin) if origin.matches(element) => *origin,
                stale => {
                    // Race between selection and gesture state: rebuild the
                    // snapshot from live state rather than drag from nothing.
                    warn!(
                        element = %id,
                        missing = stale.is_none(),
                        "drag origin snapshot inconsistent; regenerated from live state"
                    );
                    let fresh = DragOrigin::capture(element);
                    self.origins.insert(*id, fresh);
                    fresh
                }
            };

            let Some(element) = timeline.get_mut(*id) else {
                continue;
            };
            match self.kind {
                HitKind::Move => {
                    element.start_time = origin.start_time + dms;
                }
                HitKind::StretchStart => apply_stretch_start(element, &origin, dms),
                HitKind::StretchEnd => apply_stretch_end(element, &origin, dms),
            }
            // Vertical reassignment is independent of the horizontal rule.
            element.track = (origin.track as i64 + row_delta).max(0) as u32;
        }

        // Snapping applies to move gestures only and is suppressed during
        // multi-element drags.
        if self.kind == HitKind::Move && self.mode == GuideMode::Guide {
            if let Some(proposed) = timeline.get(self.target).map(|el| el.start_time) {
                let result = snap_to_neighbors(timeline, self.target, proposed, mapper);
                if let Some(element) = timeline.get_mut(self.target) {
                    element.start_time = result.start_time;
                }
                self.guide_active = result.guide_active;
            }
        }
    }

    /// Restore every element to its origin snapshot without committing.
    pub fn cancel(&self, timeline: &mut Timeline) {
        for (id, origin) in &self.origins {
            let Some(element) = timeline.get_mut(*id) else {
                continue;
            };
            element.start_time = origin.start_time;
            element.track = origin.track;
            element.body = match origin.body {
                OriginBody::Static { duration } => ElementBody::Static { duration },
                OriginBody::Dynamic {
                    trim,
                    speed,
                    source_duration,
                } => ElementBody::Dynamic {
                    trim,
                    speed,
                    source_duration,
                },
            };
        }
    }
}

fn apply_stretch_start(element: &mut Element, origin: &DragOrigin, dms: i64) {
    match (&mut element.body, &origin.body) {
        (ElementBody::Static { duration }, OriginBody::Static { duration: od }) => {
            let new_duration = od - dms;
            if new_duration > MIN_ELEMENT_DURATION_MS {
                *duration = new_duration;
                element.start_time = origin.start_time + dms;
            }
        }
        (ElementBody::Dynamic { trim, .. }, OriginBody::Dynamic { trim: ot, .. }) => {
            let new_start = ot.start + dms;
            if new_start > 0 && ot.end - new_start >= MIN_ELEMENT_DURATION_MS {
                trim.start = new_start;
            }
        }
        _ => {}
    }
}

fn apply_stretch_end(element: &mut Element, origin: &DragOrigin, dms: i64) {
    match (&mut element.body, &origin.body) {
        (ElementBody::Static { duration }, OriginBody::Static { duration: od }) => {
            let new_duration = od + dms;
            if new_duration > MIN_ELEMENT_DURATION_MS {
                *duration = new_duration;
            }
        }
        (
            ElementBody::Dynamic { trim, .. },
            OriginBody::Dynamic {
                trim: ot,
                speed,
                source_duration,
            },
        ) => {
            let new_end = ot.end + dms;
            let bound = (*source_duration as f64 / speed.max(f64::EPSILON)) as i64;
            if new_end < bound && new_end - ot.start >= MIN_ELEMENT_DURATION_MS {
                trim.end = new_end;
            }
        }
        _ => {}
    }
}
