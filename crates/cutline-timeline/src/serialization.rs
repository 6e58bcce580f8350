//! Document serialization with versioning and migration.
//!
//! Uses JSON with a schema version field for forward-compatible persistence.
//! Loading a document replaces the timeline wholesale (the store drops its
//! checkpoint history).

use cutline_core::{CutlineError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timeline::Timeline;

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// An editing session's document: the timeline plus identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub timeline: Timeline,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            timeline: Timeline::new(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Versioned document file wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentFile {
    /// Schema version for migration.
    pub version: u32,
    /// The document data.
    pub document: Document,
    /// Application version that wrote this file.
    pub app_version: String,
}

impl DocumentFile {
    pub fn new(document: Document) -> Self {
        Self {
            version: CURRENT_VERSION,
            document,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serialize to JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| CutlineError::Serialization(format!("Failed to serialize document: {e}")))
    }

    /// Deserialize from JSON bytes, applying migrations if needed.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_slice(data)
            .map_err(|e| CutlineError::Serialization(format!("Invalid JSON: {e}")))?;

        let version = raw.get("version").and_then(|v| v.as_u64()).unwrap_or(0) as u32;

        if version > CURRENT_VERSION {
            return Err(CutlineError::Serialization(format!(
                "Document file version {version} is newer than supported version {CURRENT_VERSION}"
            )));
        }

        let migrated = migrate(raw, version)?;

        serde_json::from_value(migrated)
            .map_err(|e| CutlineError::Serialization(format!("Failed to parse document: {e}")))
    }

    /// Save to a file path.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        let data = self.to_json()?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Load from a file path.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}

/// Apply sequential migrations from `from_version` to CURRENT_VERSION.
fn migrate(mut data: serde_json::Value, from_version: u32) -> Result<serde_json::Value> {
    let mut version = from_version;

    while version < CURRENT_VERSION {
        match version {
            0 => {
                // v0 → v1: unversioned files are a bare document.
                if data.get("version").is_none() {
                    data = serde_json::json!({
                        "version": 1,
                        "document": data,
                        "app_version": "0.1.0",
                    });
                }
                version = 1;
            }
            _ => {
                return Err(CutlineError::Serialization(format!(
                    "No migration path from version {version}"
                )));
            }
        }
    }

    Ok(data)
}

/// Recent documents list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentProjects {
    /// Most recent first.
    pub entries: Vec<RecentEntry>,
    /// Maximum entries to keep.
    pub max_entries: usize,
}

/// A recent document entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentEntry {
    pub path: String,
    pub name: String,
    /// Last opened timestamp (unix seconds).
    pub last_opened: u64,
}

impl RecentProjects {
    /// Create with a default cap of 10 entries.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            max_entries: 10,
        }
    }

    /// Record that a document was opened.
    pub fn record(&mut self, path: String, name: String, timestamp: u64) {
        self.entries.retain(|e| e.path != path);
        self.entries.insert(
            0,
            RecentEntry {
                path,
                name,
                last_opened: timestamp,
            },
        );
        self.entries.truncate(self.max_entries);
    }

    /// Remove an entry by path.
    pub fn remove(&mut self, path: &str) {
        self.entries.retain(|e| e.path != path);
    }
}

impl Default for RecentProjects {
    fn default() -> Self {
        Self::new()
    }
}
