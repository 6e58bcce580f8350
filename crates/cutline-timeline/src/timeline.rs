//! The Timeline map: element storage, priority order, track moves.

use std::collections::HashMap;

use cutline_core::{CutlineError, Result};
use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId, ParentKey};

/// All elements of a document, keyed by ID. Insertion order is irrelevant;
/// paint order comes from each element's `priority`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    elements: HashMap<ElementId, Element>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Insert a new element, assigning it the next paint priority. Every
    /// materialization path (ingestion, paste, split) goes through here.
    pub fn materialize(&mut self, mut element: Element) -> ElementId {
        element.priority = self.next_priority();
        let id = element.id;
        self.elements.insert(id, element);
        id
    }

    /// Insert an element as-is, keeping its priority (project load, rollback).
    pub fn insert_raw(&mut self, element: Element) {
        self.elements.insert(element.id, element);
    }

    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        self.elements.remove(&id)
    }

    /// Next paint priority: one past the current maximum, `1` when empty.
    pub fn next_priority(&self) -> u64 {
        self.elements
            .values()
            .map(|e| e.priority)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Fresh priority-ascending snapshot. Built per pass so render and
    /// hit-test loops never iterate the live map while it is being mutated.
    pub fn by_priority(&self) -> Vec<&Element> {
        let mut sorted: Vec<&Element> = self.elements.values().collect();
        sorted.sort_by_key(|e| (e.priority, e.id));
        sorted
    }

    /// Highest occupied track row, if any element exists.
    pub fn highest_track(&self) -> Option<u32> {
        self.elements.values().map(|e| e.track).max()
    }

    /// Rows the canvas shows: at least 3, enough for the deepest element.
    pub fn row_count(&self) -> u32 {
        self.highest_track().map_or(3, |t| (t + 1).max(3))
    }

    /// Absolute start offset contributed by a text element's parent.
    /// Zero for standalone and non-text elements.
    pub fn parent_offset(&self, element: &Element) -> Result<i64> {
        match element.parent {
            ParentKey::Standalone => Ok(0),
            ParentKey::Element(parent_id) => self
                .get(parent_id)
                .map(|p| p.start_time)
                .ok_or(CutlineError::MissingParent {
                    child: element.id,
                    parent: parent_id,
                }),
        }
    }

    /// Visible span `[start, end)` in absolute ms, including any
    /// text-parent offset and dynamic trim offset.
    pub fn effective_span(&self, element: &Element) -> Result<(i64, i64)> {
        let offset = self.parent_offset(element)?;
        Ok((offset + element.span_start(), offset + element.span_end()))
    }

    /// Move the given elements one row up (toward track 0). Touches only
    /// `track`; paint priority is a separate ordering.
    pub fn raise(&mut self, ids: &[ElementId]) {
        for id in ids {
            if let Some(el) = self.elements.get_mut(id) {
                el.track = el.track.saturating_sub(1);
            }
        }
    }

    /// Move the given elements one row down.
    pub fn lower(&mut self, ids: &[ElementId]) {
        for id in ids {
            if let Some(el) = self.elements.get_mut(id) {
                el.track += 1;
            }
        }
    }

    /// Whether any non-standalone text element points at `id` as its parent.
    /// Such a parent is protected from deletion.
    pub fn has_text_children(&self, id: ElementId) -> bool {
        self.elements
            .values()
            .any(|e| e.parent == ParentKey::Element(id))
    }
}
