//! External collaborator interfaces: asset loading and render options.
//!
//! The engine never decodes media. It asks the loader for an
//! already-decoded texture; on a miss it requests a load and draws nothing
//! for that clip this frame. The loader's completion notification triggers
//! a redraw, so the canvas self-heals on the next pass.

use cutline_timeline::{Element, ElementId};
use egui::TextureId;

/// Completion callback registered by the editor; fires once per finished
/// decode and only ever on the UI thread.
pub type LoadCallback = Box<dyn FnMut()>;

/// Decoded-media cache owned by the host application.
pub trait AssetLoader {
    /// Decoded still image, if already loaded.
    fn image(&self, path: &str) -> Option<TextureId>;
    /// Kick off an asynchronous image decode. Idempotent.
    fn request_image(&mut self, path: &str);

    /// Decoded gif frame sequence, if already loaded.
    fn gif(&self, path: &str) -> Option<Vec<TextureId>>;
    fn request_gif(&mut self, path: &str);

    /// Preview frame for a dynamic element, if already loaded.
    fn element_video(&self, id: ElementId) -> Option<TextureId>;
    fn request_element_video(&mut self, id: ElementId, element: &Element);

    /// Register a load-completion callback.
    fn on_load(&mut self, callback: LoadCallback);
}

/// Project-level render options owned by the host.
pub trait RenderOptionsSource {
    /// Project duration in seconds, for the end marker.
    fn project_duration_secs(&self) -> f64;
    /// Preview pixel dimensions.
    fn preview_size(&self) -> (u32, u32);
}

/// Loader that never has anything decoded. Useful for tests and headless
/// embeddings; every clip draws as outline-only.
#[derive(Default)]
pub struct NullAssetLoader {
    callbacks: Vec<LoadCallback>,
}

impl NullAssetLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssetLoader for NullAssetLoader {
    fn image(&self, _path: &str) -> Option<TextureId> {
        None
    }

    fn request_image(&mut self, _path: &str) {}

    fn gif(&self, _path: &str) -> Option<Vec<TextureId>> {
        None
    }

    fn request_gif(&mut self, _path: &str) {}

    fn element_video(&self, _id: ElementId) -> Option<TextureId> {
        None
    }

    fn request_element_video(&mut self, _id: ElementId, _element: &Element) {}

    fn on_load(&mut self, callback: LoadCallback) {
        self.callbacks.push(callback);
    }
}

/// Fixed render options for tests and simple embeddings.
#[derive(Debug, Clone, Copy)]
pub struct FixedRenderOptions {
    pub duration_secs: f64,
    pub preview_size: (u32, u32),
}

impl Default for FixedRenderOptions {
    fn default() -> Self {
        Self {
            duration_secs: 60.0,
            preview_size: (1920, 1080),
        }
    }
}

impl RenderOptionsSource for FixedRenderOptions {
    fn project_duration_secs(&self) -> f64 {
        self.duration_secs
    }

    fn preview_size(&self) -> (u32, u32) {
        self.preview_size
    }
}
