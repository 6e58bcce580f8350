//! Magnetic snapping of a dragged clip to neighbor edges.

use cutline_core::TimeMapper;
use cutline_timeline::{ElementId, Timeline};

use crate::layout::EDGE_MARGIN;

/// Outcome of a snap query: the (possibly clamped) start time, and whether
/// a guide matched. The flag drives visual feedback only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapResult {
    pub start_time: i64,
    pub guide_active: bool,
}

/// Clamp a proposed `start_time` for the dragged element so that a nearly
/// flush edge becomes exactly flush with a neighbor's edge.
///
/// Both projected edges of the dragged element are compared against both
/// edges of every other element, four pairs per candidate. When several
/// guides match, the last one evaluated in iteration order wins; there is
/// no priority among simultaneous candidates.
pub fn snap_to_neighbors(
    timeline: &Timeline,
    dragged: ElementId,
    proposed_start_time: i64,
    mapper: &TimeMapper,
) -> SnapResult {
    let passthrough = SnapResult {
        start_time: proposed_start_time,
        guide_active: false,
    };
    let Some(element) = timeline.get(dragged) else {
        return passthrough;
    };

    // The visible span leads the start time by the trim offset (zero for
    // static elements); the span length is unchanged by a move.
    let lead = element.span_start() - element.start_time;
    let span = element.visible_duration();
    let start_px = mapper.ms_to_px_f(proposed_start_time + lead);
    let end_px = mapper.ms_to_px_f(proposed_start_time + lead + span);

    let mut snapped: Option<i64> = None;
    for other in timeline.by_priority() {
        if other.id == dragged {
            continue;
        }
        let Ok((other_start, other_end)) = timeline.effective_span(other) else {
            continue;
        };
        for edge_ms in [other_start, other_end] {
            let edge_px = mapper.ms_to_px_f(edge_ms);
            if (start_px - edge_px).abs() <= EDGE_MARGIN {
                snapped = Some(edge_ms - lead);
            }
            if (end_px - edge_px).abs() <= EDGE_MARGIN {
                snapped = Some(edge_ms - lead - span);
            }
        }
    }

    match snapped {
        Some(start_time) => SnapResult {
            start_time,
            guide_active: true,
        },
        None => passthrough,
    }
}
