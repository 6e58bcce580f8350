//! External store interfaces and the in-memory reference store.
//!
//! The engine never owns its persistence: it mutates a working copy of the
//! Timeline, hands the whole structure to the store, and the store
//! broadcasts to subscribers. Undo/redo is snapshot-based: `checkpoint`
//! saves the current timeline before a destructive operation, `rollback`
//! walks the snapshot history in either direction.

use tracing::debug;

use crate::element::ElementId;
use crate::timeline::Timeline;

/// Which way to walk the checkpoint history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackDirection {
    /// Undo: step to the previous snapshot.
    Back,
    /// Redo: step to the next snapshot.
    Forward,
}

/// Change notification callback. Receives the full replacement timeline.
pub type Subscriber = Box<dyn FnMut(&Timeline)>;

/// The document-side timeline store the engine talks to.
///
/// Injected at construction; subscription is explicit callback
/// registration, never an ambient singleton.
pub trait TimelineStore {
    /// Current timeline (a full copy; the engine mutates its own working
    /// copy and patches it back).
    fn timeline(&self) -> Timeline;

    /// Replace the timeline wholesale and broadcast to subscribers.
    fn patch_timeline(&mut self, timeline: Timeline);

    /// Push an undo snapshot of the current timeline. Called by the
    /// destructive operations (split/paste/delete) before they patch.
    fn checkpoint_timeline(&mut self);

    /// Walk the snapshot history and broadcast the restored timeline.
    fn rollback(&mut self, direction: RollbackDirection);

    /// Remove a single element and broadcast.
    fn remove_element(&mut self, id: ElementId);

    /// Register a change callback.
    fn subscribe(&mut self, subscriber: Subscriber);
}

/// In-memory store with a bounded snapshot history. The reference
/// implementation for tests and simple embeddings.
pub struct MemoryStore {
    current: Timeline,
    /// Snapshots behind the current state (most recent last).
    undo: Vec<Timeline>,
    /// Snapshots undone from (most recent last).
    redo: Vec<Timeline>,
    max_depth: usize,
    subscribers: Vec<Subscriber>,
}

impl MemoryStore {
    /// Create a store with the given maximum history depth.
    pub fn new(max_depth: usize) -> Self {
        Self {
            current: Timeline::new(),
            undo: Vec::new(),
            redo: Vec::new(),
            max_depth,
            subscribers: Vec::new(),
        }
    }

    /// Replace the whole document state, dropping history (project load).
    pub fn load(&mut self, timeline: Timeline) {
        self.undo.clear();
        self.redo.clear();
        self.current = timeline;
        self.broadcast();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo.len()
    }

    fn broadcast(&mut self) {
        for subscriber in &mut self.subscribers {
            subscriber(&self.current);
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(200)
    }
}

impl TimelineStore for MemoryStore {
    fn timeline(&self) -> Timeline {
        self.current.clone()
    }

    fn patch_timeline(&mut self, timeline: Timeline) {
        self.current = timeline;
        self.broadcast();
    }

    fn checkpoint_timeline(&mut self) {
        // A new checkpoint invalidates the redo arm.
        self.redo.clear();
        self.undo.push(self.current.clone());
        if self.undo.len() > self.max_depth {
            self.undo.remove(0);
        }
        debug!(depth = self.undo.len(), "timeline checkpoint");
    }

    fn rollback(&mut self, direction: RollbackDirection) {
        let restored = match direction {
            RollbackDirection::Back => {
                let Some(snapshot) = self.undo.pop() else {
                    return;
                };
                self.redo.push(std::mem::replace(&mut self.current, snapshot));
                &self.current
            }
            RollbackDirection::Forward => {
                let Some(snapshot) = self.redo.pop() else {
                    return;
                };
                self.undo.push(std::mem::replace(&mut self.current, snapshot));
                &self.current
            }
        };
        debug!(elements = restored.len(), ?direction, "timeline rollback");
        self.broadcast();
    }

    fn remove_element(&mut self, id: ElementId) {
        self.current.remove(id);
        self.broadcast();
    }

    fn subscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }
}
