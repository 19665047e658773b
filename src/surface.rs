use egui::{Color32, ColorImage, Pos2};
use std::io::Cursor;
use tiny_skia::{
    BlendMode, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Transform,
};

use crate::error::{ExportError, SurfaceError};
use crate::stroke::{Ink, StrokeStyle};

/// What happens to existing pixels when the surface changes size
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Start over with a blank raster
    #[default]
    Discard,
    /// Copy the old pixels into the top-left corner of the new raster
    Preserve,
}

/// The output boundary of the drawing controller.
///
/// Coordinates are in surface pixels with the origin at the top-left corner.
pub trait RasterSink {
    /// Current `[width, height]` in pixels
    fn size(&self) -> [u32; 2];

    /// Reallocate the raster at the new size, filled with `background`.
    /// With [`ResizePolicy::Preserve`] the old pixels are copied over the fill unchanged.
    fn resize(
        &mut self,
        width: u32,
        height: u32,
        background: Color32,
        policy: ResizePolicy,
    ) -> Result<(), SurfaceError>;

    /// Cover the whole raster with `color`
    fn fill(&mut self, color: Color32);

    /// Make the whole raster transparent
    fn clear(&mut self);

    /// Round dot of diameter `style.width` centered on `center`
    fn draw_dot(&mut self, center: Pos2, style: &StrokeStyle);

    /// Segment with round caps and joins
    fn draw_line(&mut self, from: Pos2, to: Pos2, style: &StrokeStyle);

    /// Lossless snapshot of the current raster
    fn encode_png(&self) -> Result<Vec<u8>, ExportError>;
}

/// CPU raster backed by a `tiny_skia::Pixmap`
pub struct Surface {
    pixmap: Pixmap,
    revision: u64,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("revision", &self.revision)
            .finish()
    }
}

fn to_skia(color: Color32) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn allocate(width: u32, height: u32) -> Result<Pixmap, SurfaceError> {
    Pixmap::new(width, height).ok_or(SurfaceError::InvalidSize { width, height })
}

impl Surface {
    /// A transparent surface of the given size
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        Ok(Self {
            pixmap: allocate(width, height)?,
            revision: 0,
        })
    }

    /// Bumped on every mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Demultiplied RGBA of a single pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color32::from_rgba_unmultiplied(
            c.red(),
            c.green(),
            c.blue(),
            c.alpha(),
        ))
    }

    /// Alpha of a single pixel, 0 meaning fully erased
    pub fn alpha(&self, x: u32, y: u32) -> Option<u8> {
        self.pixmap.pixel(x, y).map(|c| c.alpha())
    }

    /// Copy for uploading into an egui texture
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_premultiplied(
            [self.pixmap.width() as usize, self.pixmap.height() as usize],
            self.pixmap.data(),
        )
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn paint_for(ink: Ink) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.anti_alias = true;
        match ink {
            Ink::Paint(color) => paint.set_color(to_skia(color)),
            Ink::Erase => {
                // only alpha matters for destination-out
                paint.set_color(tiny_skia::Color::BLACK);
                paint.blend_mode = BlendMode::DestinationOut;
            }
        }
        paint
    }
}

impl RasterSink for Surface {
    fn size(&self) -> [u32; 2] {
        [self.pixmap.width(), self.pixmap.height()]
    }

    fn resize(
        &mut self,
        width: u32,
        height: u32,
        background: Color32,
        policy: ResizePolicy,
    ) -> Result<(), SurfaceError> {
        // Fresh raster with the background
        let mut pixmap = allocate(width, height)?;
        pixmap.fill(to_skia(background));

        // Copy the old pixels over it, transparency included
        if policy == ResizePolicy::Preserve {
            let paint = PixmapPaint {
                blend_mode: BlendMode::Source,
                ..PixmapPaint::default()
            };
            pixmap.draw_pixmap(
                0,
                0,
                self.pixmap.as_ref(),
                &paint,
                Transform::identity(),
                None,
            );
        }

        // Swap in and mark for re-upload
        self.pixmap = pixmap;
        self.touch();
        Ok(())
    }

    fn fill(&mut self, color: Color32) {
        self.pixmap.fill(to_skia(color));
        self.touch();
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        self.touch();
    }

    fn draw_dot(&mut self, center: Pos2, style: &StrokeStyle) {
        if style.width <= 0.0 {
            return;
        }
        let Some(path) = PathBuilder::from_circle(center.x, center.y, style.width / 2.0) else {
            return;
        };
        let paint = Self::paint_for(style.ink);
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        self.touch();
    }

    fn draw_line(&mut self, from: Pos2, to: Pos2, style: &StrokeStyle) {
        if style.width <= 0.0 {
            return;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        let Some(path) = pb.finish() else {
            // zero-length segment: a round cap is just a dot
            self.draw_dot(to, style);
            return;
        };

        // Round caps and joins
        let stroke = tiny_skia::Stroke {
            width: style.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..tiny_skia::Stroke::default()
        };
        let paint = Self::paint_for(style.ink);
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        self.touch();
    }

    fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        let rgba: Vec<u8> = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        let image = image::RgbaImage::from_raw(self.pixmap.width(), self.pixmap.height(), rgba)
            .ok_or(ExportError::BufferSize)?;

        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn paint(width: f32, color: Color32) -> StrokeStyle {
        StrokeStyle {
            width,
            ink: Ink::Paint(color),
        }
    }

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = Surface::new(8, 6).unwrap();
        assert_eq!(surface.size(), [8, 6]);
        assert_eq!(surface.alpha(3, 3), Some(0));
        assert_eq!(surface.revision(), 0);
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(matches!(
            Surface::new(0, 10),
            Err(SurfaceError::InvalidSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_dot_covers_its_center_only() {
        let mut surface = Surface::new(20, 20).unwrap();
        surface.draw_dot(pos2(10.0, 10.0), &paint(4.0, Color32::RED));
        assert_eq!(surface.pixel(10, 10), Some(Color32::RED));
        assert_eq!(surface.alpha(2, 2), Some(0));
        assert_eq!(surface.revision(), 1);
    }

    #[test]
    fn test_zero_width_draws_nothing() {
        let mut surface = Surface::new(10, 10).unwrap();
        surface.draw_line(pos2(1.0, 1.0), pos2(8.0, 8.0), &paint(0.0, Color32::RED));
        surface.draw_dot(pos2(5.0, 5.0), &paint(0.0, Color32::RED));
        assert_eq!(surface.revision(), 0);
        assert_eq!(surface.alpha(5, 5), Some(0));
    }

    #[test]
    fn test_color_image_matches_size() {
        let mut surface = Surface::new(5, 3).unwrap();
        surface.fill(Color32::WHITE);
        let image = surface.to_color_image();
        assert_eq!(image.size, [5, 3]);
        assert_eq!(image.pixels[0], Color32::WHITE);
    }
}
