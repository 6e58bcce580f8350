//! Cutline UI - timeline canvas and interaction engine
//!
//! Provides the editing surface:
//! - Hit testing against overlapping clips
//! - Selection model and drag/resize gestures with origin snapshots
//! - Magnetic snapping to neighbor edges
//! - The full-repaint canvas renderer
//! - External interfaces for asset loading and render options

pub mod assets;
pub mod drag;
pub mod editor;
pub mod layout;
pub mod renderer;
pub mod selection;
pub mod snapping;
pub mod theme;

pub use assets::{AssetLoader, FixedRenderOptions, NullAssetLoader, RenderOptionsSource};
pub use drag::{DragGesture, DragOrigin, OriginBody};
pub use editor::TimelineEditor;
pub use hit_test::{cursor_icon, hit_test, Hit, HitKind};
pub use layout::{element_rect, ViewState, EDGE_MARGIN, ROW_HEIGHT};
pub use renderer::show_timeline;
pub use selection::{GuideMode, SelectionModel};
pub use snapping::{snap_to_neighbors, SnapResult};
pub use theme::Theme;
