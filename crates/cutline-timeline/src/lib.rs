//! Cutline Timeline - Timeline data model
//!
//! Implements the timeline structure for the editor:
//! - Elements (static clips and trimmed dynamic clips)
//! - The Timeline map with priority and track ordering
//! - Clipboard, split, and protected delete
//! - External store interfaces with checkpoint/rollback history

pub mod clipboard;
pub mod element;
pub mod serialization;
pub mod store;
pub mod timeline;

pub use clipboard::ClipboardEngine;
pub use element::{
    Element, ElementBody, ElementClass, ElementId, FileType, ParentKey, TrimWindow,
};
pub use serialization::{Document, DocumentFile, RecentProjects};
pub use store::{MemoryStore, RollbackDirection, TimelineStore};
pub use timeline::Timeline;
