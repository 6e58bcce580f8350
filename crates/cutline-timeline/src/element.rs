//! Element types for the timeline.

use cutline_core::{Animation, CutlineError, Result, Rgba8};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique element ID.
pub type ElementId = Uuid;

/// Media kind of an element. Decides static vs dynamic geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Gif,
    Text,
    Shape,
    Video,
    Audio,
}

/// Whether an element's visible duration is set directly (static) or is a
/// trim window into a longer source (dynamic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementClass {
    Static,
    Dynamic,
}

impl FileType {
    /// Classify an ingested file by extension. An unrecognized extension is
    /// a fatal ingestion-time error, never a silent default.
    pub fn from_path(path: &str) -> Result<Self> {
        let ext = path
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Ok(match ext.as_str() {
            "png" | "jpg" | "jpeg" | "webp" | "bmp" => Self::Image,
            "gif" => Self::Gif,
            "mp4" | "mov" | "webm" | "mkv" | "avi" => Self::Video,
            "mp3" | "wav" | "aac" | "flac" | "ogg" | "m4a" => Self::Audio,
            _ => return Err(CutlineError::UnknownFileType(path.to_string())),
        })
    }

    pub fn class(self) -> ElementClass {
        match self {
            Self::Image | Self::Gif | Self::Text | Self::Shape => ElementClass::Static,
            Self::Video | Self::Audio => ElementClass::Dynamic,
        }
    }
}

/// Trim window: millisecond offsets into a dynamic element's source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrimWindow {
    pub start: i64,
    pub end: i64,
}

impl TrimWindow {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Visible span of the window.
    #[inline]
    pub fn span(&self) -> i64 {
        self.end - self.start
    }
}

/// Binding of a text element to the element it annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentKey {
    /// Free-floating text, positioned by its own start time.
    #[default]
    Standalone,
    /// Child of another element; the parent's start time offsets this
    /// element's rendering and hit testing.
    Element(ElementId),
}

/// Variant payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementBody {
    Static {
        /// Visible duration in ms.
        duration: i64,
    },
    Dynamic {
        trim: TrimWindow,
        /// Playback speed (1.0 = normal).
        speed: f64,
        /// Duration of the underlying source in ms.
        source_duration: i64,
    },
}

/// A clip on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique element ID
    pub id: ElementId,
    /// Display name
    pub name: String,
    /// Media kind
    pub filetype: FileType,
    /// Source media path (images, gifs, video, audio)
    #[serde(default)]
    pub source_path: Option<String>,
    /// Absolute start time on the timeline, ms
    pub start_time: i64,
    /// Vertical row index
    pub track: u32,
    /// Paint order; decoupled from `track`
    pub priority: u64,
    /// Timeline display color
    #[serde(default)]
    pub color: Rgba8,
    /// Text parent binding (meaningful for text elements)
    #[serde(default)]
    pub parent: ParentKey,
    pub body: ElementBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
}

impl Element {
    /// Create a static element (image/text/shape/gif).
    pub fn new_static(name: impl Into<String>, filetype: FileType, duration: i64) -> Result<Self> {
        if filetype.class() != ElementClass::Static {
            return Err(CutlineError::InvalidParameter(format!(
                "{filetype:?} is not a static filetype"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            filetype,
            source_path: None,
            start_time: 0,
            track: 0,
            priority: 0,
            color: Rgba8::default(),
            parent: ParentKey::Standalone,
            body: ElementBody::Static { duration },
            animation: None,
        })
    }

    /// Create a dynamic element (video/audio) showing its full source.
    pub fn new_dynamic(
        name: impl Into<String>,
        filetype: FileType,
        source_path: impl Into<String>,
        source_duration: i64,
    ) -> Result<Self> {
        if filetype.class() != ElementClass::Dynamic {
            return Err(CutlineError::InvalidParameter(format!(
                "{filetype:?} is not a dynamic filetype"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            filetype,
            source_path: Some(source_path.into()),
            start_time: 0,
            track: 0,
            priority: 0,
            color: Rgba8::default(),
            parent: ParentKey::Standalone,
            body: ElementBody::Dynamic {
                trim: TrimWindow::new(0, source_duration),
                speed: 1.0,
                source_duration,
            },
            animation: None,
        })
    }

    #[inline]
    pub fn class(&self) -> ElementClass {
        self.filetype.class()
    }

    /// Start of the visible span, before any text-parent offset.
    pub fn span_start(&self) -> i64 {
        match &self.body {
            ElementBody::Static { .. } => self.start_time,
            ElementBody::Dynamic { trim, .. } => self.start_time + trim.start,
        }
    }

    /// End of the visible span, before any text-parent offset.
    pub fn span_end(&self) -> i64 {
        match &self.body {
            ElementBody::Static { duration } => self.start_time + duration,
            ElementBody::Dynamic { trim, .. } => self.start_time + trim.end,
        }
    }

    /// Visible duration in ms.
    pub fn visible_duration(&self) -> i64 {
        self.span_end() - self.span_start()
    }

    /// Upper bound for `trim.end`: the source length at the current speed.
    /// `None` for static elements.
    pub fn trim_end_bound(&self) -> Option<i64> {
        match &self.body {
            ElementBody::Static { .. } => None,
            ElementBody::Dynamic {
                speed,
                source_duration,
                ..
            } => Some((*source_duration as f64 / speed.max(f64::EPSILON)) as i64),
        }
    }

    /// Deep clone under a fresh ID (clipboard/split materialization).
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }
}
