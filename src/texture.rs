use egui::{Context, TextureHandle, TextureOptions};

use crate::surface::Surface;

/// Mirrors the surface into an egui texture, re-uploading only after changes
#[derive(Default)]
pub struct SurfaceTexture {
    handle: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
}

impl std::fmt::Debug for SurfaceTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceTexture")
            .field("uploaded_revision", &self.uploaded_revision)
            .finish()
    }
}

impl SurfaceTexture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `surface` has changed since the last upload
    pub fn is_stale(&self, surface: &Surface) -> bool {
        self.handle.is_none() || self.uploaded_revision != Some(surface.revision())
    }

    /// Texture showing the current surface contents
    pub fn sync(&mut self, ctx: &Context, surface: &Surface) -> &TextureHandle {
        let stale = self.is_stale(surface);
        let handle = match self.handle.take() {
            Some(mut handle) => {
                if stale {
                    handle.set(surface.to_color_image(), TextureOptions::NEAREST);
                }
                handle
            }
            None => ctx.load_texture(
                "drawing_surface",
                surface.to_color_image(),
                TextureOptions::NEAREST,
            ),
        };
        self.uploaded_revision = Some(surface.revision());
        self.handle.insert(handle)
    }
}
