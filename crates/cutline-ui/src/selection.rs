//! Selection model: ordered, deduplicated set of selected element IDs.

use cutline_timeline::{ElementId, Timeline};

/// Whether a move drag snaps to neighbor edges. Multi-selection drags run
/// in `MoveNotGuide`, which suppresses per-element snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuideMode {
    #[default]
    Guide,
    MoveNotGuide,
}

/// The current selection, in click order.
#[derive(Debug, Default)]
pub struct SelectionModel {
    ids: Vec<ElementId>,
    mode: GuideMode,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    /// The element whose side-options panel is shown.
    pub fn primary(&self) -> Option<ElementId> {
        self.ids.first().copied()
    }

    pub fn mode(&self) -> GuideMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// Apply the click rules. Returns whether the selection changed (the
    /// caller refreshes the primary element's side panel on change):
    /// - shift-click adds the hit element, entering `MoveNotGuide` once more
    ///   than one element is selected;
    /// - a plain click on an already-selected element re-arms the drag
    ///   without clearing the others;
    /// - a plain click on an unselected element replaces the selection;
    /// - a click on empty canvas clears it.
    pub fn click(&mut self, hit: Option<ElementId>, shift: bool) -> bool {
        match hit {
            None => {
                let changed = !self.ids.is_empty();
                self.ids.clear();
                self.mode = GuideMode::Guide;
                changed
            }
            Some(id) if shift => {
                let added = if self.ids.contains(&id) {
                    false
                } else {
                    self.ids.push(id);
                    true
                };
                if self.ids.len() > 1 {
                    self.mode = GuideMode::MoveNotGuide;
                }
                added
            }
            Some(id) if self.ids.contains(&id) => false,
            Some(id) => {
                self.ids = vec![id];
                self.mode = GuideMode::Guide;
                true
            }
        }
    }

    /// Select exactly one element (split moves the selection to the clone).
    pub fn select_only(&mut self, id: ElementId) {
        self.ids = vec![id];
        self.mode = GuideMode::Guide;
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.mode = GuideMode::Guide;
    }

    /// Drop IDs that no longer exist (after rollback or delete).
    pub fn retain_existing(&mut self, timeline: &Timeline) {
        self.ids.retain(|id| timeline.contains(*id));
        if self.ids.len() <= 1 {
            self.mode = GuideMode::Guide;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutline_timeline::{Element, FileType};

    fn ids(n: usize) -> Vec<ElementId> {
        (0..n).map(|_| uuid::Uuid::new_v4()).collect()
    }

    #[test]
    fn test_plain_click_replaces() {
        let v = ids(2);
        let mut sel = SelectionModel::new();

        assert!(sel.click(Some(v[0]), false));
        assert_eq!(sel.ids(), &[v[0]]);

        assert!(sel.click(Some(v[1]), false));
        assert_eq!(sel.ids(), &[v[1]]);
        assert_eq!(sel.mode(), GuideMode::Guide);
    }

    #[test]
    fn test_shift_click_adds_and_enters_move_not_guide() {
        let v = ids(2);
        let mut sel = SelectionModel::new();

        sel.click(Some(v[0]), false);
        assert_eq!(sel.mode(), GuideMode::Guide);

        assert!(sel.click(Some(v[1]), true));
        assert_eq!(sel.ids(), &[v[0], v[1]]);
        assert_eq!(sel.mode(), GuideMode::MoveNotGuide);
    }

    #[test]
    fn test_shift_click_deduplicates() {
        let v = ids(1);
        let mut sel = SelectionModel::new();
        sel.click(Some(v[0]), false);
        assert!(!sel.click(Some(v[0]), true));
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn test_click_on_selected_rearms_without_clearing() {
        let v = ids(2);
        let mut sel = SelectionModel::new();
        sel.click(Some(v[0]), false);
        sel.click(Some(v[1]), true);

        // Plain click on an already-selected element keeps the whole set.
        assert!(!sel.click(Some(v[0]), false));
        assert_eq!(sel.ids(), &[v[0], v[1]]);
    }

    #[test]
    fn test_empty_click_clears() {
        let v = ids(2);
        let mut sel = SelectionModel::new();
        sel.click(Some(v[0]), false);
        sel.click(Some(v[1]), true);

        assert!(sel.click(None, false));
        assert!(sel.is_empty());
        assert_eq!(sel.mode(), GuideMode::Guide);

        // Clearing an empty selection is not a change.
        assert!(!sel.click(None, false));
    }

    #[test]
    fn test_primary_is_first_clicked() {
        let v = ids(2);
        let mut sel = SelectionModel::new();
        sel.click(Some(v[0]), false);
        sel.click(Some(v[1]), true);
        assert_eq!(sel.primary(), Some(v[0]));
    }

    #[test]
    fn test_retain_existing_prunes_and_resets_mode() {
        let mut timeline = Timeline::new();
        let kept = timeline.materialize(Element::new_static("a", FileType::Image, 1000).unwrap());
        let gone = uuid::Uuid::new_v4();

        let mut sel = SelectionModel::new();
        sel.click(Some(kept), false);
        sel.click(Some(gone), true);
        assert_eq!(sel.mode(), GuideMode::MoveNotGuide);

        sel.retain_existing(&timeline);
        assert_eq!(sel.ids(), &[kept]);
        assert_eq!(sel.mode(), GuideMode::Guide);
    }
}
