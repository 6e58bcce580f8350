//! The timeline editor: input → hit-test/selection → mutating engine →
//! store → redraw.
//!
//! Collaborators (timeline store, asset loader, render options) are
//! injected at construction and subscribed to by explicit callback
//! registration. All mutation happens synchronously on the UI thread; the
//! editor mutates a working copy of the timeline and hands the whole
//! structure back to the store for broadcast.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cutline_core::{CutlineError, Result, TimeMapper};
use cutline_timeline::{
    clipboard, ClipboardEngine, Element, ElementId, RollbackDirection, TimelineStore,
};
use egui::{CursorIcon, Pos2};
use tracing::{debug, error};

use crate::assets::{AssetLoader, RenderOptionsSource};
use crate::drag::DragGesture;
use crate::hit_test::{cursor_icon, hit_test, HitKind};
use crate::layout::ViewState;
use crate::selection::SelectionModel;

/// Owns one editing session's interaction state.
pub struct TimelineEditor {
    store: Rc<RefCell<dyn TimelineStore>>,
    assets: Rc<RefCell<dyn AssetLoader>>,
    options: Rc<dyn RenderOptionsSource>,
    pub view: ViewState,
    selection: SelectionModel,
    clipboard: ClipboardEngine,
    /// Active mouse-down→mouse-up gesture. Always reset on pointer-up,
    /// regardless of how the handlers exit.
    gesture: Option<DragGesture>,
    repaint: Rc<Cell<bool>>,
    selection_changed: bool,
}

impl TimelineEditor {
    pub fn new(
        store: Rc<RefCell<dyn TimelineStore>>,
        assets: Rc<RefCell<dyn AssetLoader>>,
        options: Rc<dyn RenderOptionsSource>,
    ) -> Self {
        let repaint = Rc::new(Cell::new(true));

        // Any store broadcast or finished decode schedules a full redraw.
        let flag = Rc::clone(&repaint);
        store
            .borrow_mut()
            .subscribe(Box::new(move |_| flag.set(true)));
        let flag = Rc::clone(&repaint);
        assets.borrow_mut().on_load(Box::new(move || flag.set(true)));

        Self {
            store,
            assets,
            options,
            view: ViewState::default(),
            selection: SelectionModel::new(),
            clipboard: ClipboardEngine::new(),
            gesture: None,
            repaint,
            selection_changed: false,
        }
    }

    pub fn mapper(&self) -> TimeMapper {
        self.view.mapper()
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn assets(&self) -> Rc<RefCell<dyn AssetLoader>> {
        Rc::clone(&self.assets)
    }

    pub fn options(&self) -> Rc<dyn RenderOptionsSource> {
        Rc::clone(&self.options)
    }

    pub fn store(&self) -> Rc<RefCell<dyn TimelineStore>> {
        Rc::clone(&self.store)
    }

    pub fn guide_active(&self) -> bool {
        self.gesture.as_ref().is_some_and(|g| g.guide_active())
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Whether a redraw is pending; clears the flag.
    pub fn take_repaint(&mut self) -> bool {
        self.repaint.replace(false)
    }

    /// Whether the selection changed since the last check (side-options
    /// panel refresh); clears the flag.
    pub fn take_selection_changed(&mut self) -> bool {
        std::mem::take(&mut self.selection_changed)
    }

    /// The element whose side-options panel is shown.
    pub fn primary_element(&self) -> Option<Element> {
        let id = self.selection.primary()?;
        self.store.borrow().timeline().get(id).cloned()
    }

    // ── Pointer handlers ───────────────────────────────────────

    /// Mouse-move with no button down: resolve the cursor icon.
    /// `pos` is in content coordinates (already scroll-adjusted).
    pub fn on_pointer_move(&mut self, pos: Pos2) -> CursorIcon {
        if let Some(gesture) = &self.gesture {
            return match gesture.kind() {
                HitKind::StretchStart => CursorIcon::ResizeWest,
                HitKind::StretchEnd => CursorIcon::ResizeEast,
                HitKind::Move => CursorIcon::Grabbing,
            };
        }
        let timeline = self.store.borrow().timeline();
        cursor_icon(hit_test(&timeline, &self.mapper(), pos))
    }

    /// Mouse-down: selection rules, then arm the drag gesture. This is the
    /// error boundary: a failure is logged, drag state resets to safe, and
    /// a redraw is requested; never retried or surfaced.
    pub fn on_pointer_down(&mut self, pos: Pos2, shift: bool) {
        if let Err(e) = self.pointer_down_inner(pos, shift) {
            error!(error = %e, "pointer-down handler failed; resetting drag state");
            self.gesture = None;
            self.repaint.set(true);
        }
    }

    fn pointer_down_inner(&mut self, pos: Pos2, shift: bool) -> Result<()> {
        let timeline = self.store.borrow().timeline();
        let hit = hit_test(&timeline, &self.mapper(), pos);

        if self.selection.click(hit.map(|h| h.id), shift) {
            self.selection_changed = true;
        }

        if let Some(hit) = hit {
            // The hit element must still exist to snapshot drag origins.
            if !timeline.contains(hit.id) {
                return Err(CutlineError::NotFound(hit.id));
            }
            self.gesture = Some(DragGesture::begin(&timeline, &self.selection, hit, pos));
        }
        self.repaint.set(true);
        Ok(())
    }

    /// Mouse-move with the button down: live-preview the gesture.
    pub fn on_pointer_drag(&mut self, pos: Pos2) {
        let Some(gesture) = &mut self.gesture else {
            return;
        };
        let mut timeline = self.store.borrow().timeline();
        let mapper = TimeMapper::new(self.view.range);
        gesture.update(&mut timeline, &mapper, self.selection.ids(), pos);
        self.store.borrow_mut().patch_timeline(timeline);
    }

    /// Mouse-up: the gesture ends. The reset happens before anything else
    /// so a failure can never leave dragging stuck; plain drags do not
    /// checkpoint (split/paste/delete are the checkpointing operations).
    pub fn on_pointer_up(&mut self) {
        let finished = self.gesture.take();
        if finished.is_some() {
            self.repaint.set(true);
        }
    }

    /// Abort the gesture, restoring every element from its origin snapshot
    /// without committing.
    pub fn cancel_drag(&mut self) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        let mut timeline = self.store.borrow().timeline();
        gesture.cancel(&mut timeline);
        self.store.borrow_mut().patch_timeline(timeline);
    }

    // ── Editing commands ───────────────────────────────────────

    /// Add a newly ingested element; it materializes with a fresh priority.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let mut timeline = self.store.borrow().timeline();
        let id = timeline.materialize(element);
        self.store.borrow_mut().patch_timeline(timeline);
        id
    }

    /// Copy the single selected element to the clipboard buffer.
    pub fn copy(&mut self) {
        let timeline = self.store.borrow().timeline();
        self.clipboard.copy(&timeline, self.selection.ids());
    }

    /// Paste the clipboard buffer; every element lands under a fresh ID and
    /// priority. Checkpoints.
    pub fn paste(&mut self) {
        let mut timeline = self.store.borrow().timeline();
        let pasted = self.clipboard.paste(&mut timeline);
        if pasted.is_empty() {
            return;
        }
        debug!(count = pasted.len(), "pasted elements");
        let mut store = self.store.borrow_mut();
        store.checkpoint_timeline();
        store.patch_timeline(timeline);
    }

    /// Split the single selected element at the playhead; the selection
    /// moves to the clone. Checkpoints.
    pub fn split_at_playhead(&mut self) {
        let mut timeline = self.store.borrow().timeline();
        let Some(clone_id) =
            clipboard::split_at(&mut timeline, self.selection.ids(), self.view.playhead_ms)
        else {
            return;
        };
        {
            let mut store = self.store.borrow_mut();
            store.checkpoint_timeline();
            store.patch_timeline(timeline);
        }
        self.selection.select_only(clone_id);
        self.selection_changed = true;
    }

    /// Delete the selected elements, honoring text-parent protection.
    /// Checkpoints when anything was removed.
    pub fn delete_selection(&mut self) {
        let mut timeline = self.store.borrow().timeline();
        let removed = clipboard::delete(&mut timeline, self.selection.ids());
        if removed.is_empty() {
            return;
        }
        {
            let mut store = self.store.borrow_mut();
            store.checkpoint_timeline();
            store.patch_timeline(timeline);
        }
        let timeline = self.store.borrow().timeline();
        self.selection.retain_existing(&timeline);
        self.selection_changed = true;
    }

    /// Move the selected elements one row up (arrow key). Track only;
    /// paint priority is untouched.
    pub fn raise_selection(&mut self) {
        let mut timeline = self.store.borrow().timeline();
        timeline.raise(self.selection.ids());
        self.store.borrow_mut().patch_timeline(timeline);
    }

    /// Move the selected elements one row down.
    pub fn lower_selection(&mut self) {
        let mut timeline = self.store.borrow().timeline();
        timeline.lower(self.selection.ids());
        self.store.borrow_mut().patch_timeline(timeline);
    }

    pub fn undo(&mut self) {
        self.store.borrow_mut().rollback(RollbackDirection::Back);
        self.prune_selection();
    }

    pub fn redo(&mut self) {
        self.store.borrow_mut().rollback(RollbackDirection::Forward);
        self.prune_selection();
    }

    fn prune_selection(&mut self) {
        let timeline = self.store.borrow().timeline();
        let before = self.selection.len();
        self.selection.retain_existing(&timeline);
        if self.selection.len() != before {
            self.selection_changed = true;
        }
    }
}
