use egui::{Color32, Pos2};

use crate::brush::{BrushMode, BrushSettings, Palette};
use crate::config::DrawingConfig;
use crate::error::{DrawResult, ExportError, SurfaceError};
use crate::export::{ExportArtifact, Exporter};
use crate::input::{ControlEvent, InputSource, SurfaceEvent};
use crate::stroke::GestureState;
use crate::surface::{RasterSink, ResizePolicy};
use crate::util::time;

/// Owns the surface and turns events into raster operations.
///
/// Brush settings, palette selection and the in-flight gesture live here.
#[derive(Debug)]
pub struct DrawingController<S: RasterSink> {
    sink: S,
    settings: BrushSettings,
    palette: Palette,
    gesture: GestureState,
    exporter: Exporter,
    background: Color32,
    clear_to_transparent: bool,
    resize_policy: ResizePolicy,
}

impl<S: RasterSink> DrawingController<S> {
    /// Take ownership of an already sized `sink` and paint the background
    pub fn new(mut sink: S, config: &DrawingConfig) -> Self {
        let background = config.background.0;
        sink.fill(background);

        let [width, height] = sink.size();
        log::debug!("Drawing surface initialized at {}x{}", width, height);

        Self {
            sink,
            settings: BrushSettings::from_config(config),
            palette: Palette::from_config(config),
            gesture: GestureState::Idle,
            exporter: Exporter::new(config.export_prefix.clone()),
            background,
            clear_to_transparent: config.clear_to_transparent,
            resize_policy: if config.preserve_on_resize {
                ResizePolicy::Preserve
            } else {
                ResizePolicy::Discard
            },
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn settings(&self) -> &BrushSettings {
        &self.settings
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn mode(&self) -> BrushMode {
        self.settings.mode
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    /// The swatch to highlight in the toolbar, if any
    pub fn active_swatch(&self) -> Option<usize> {
        self.palette.active_swatch(self.settings.mode)
    }

    /// React to one event. Only [`ControlEvent::Export`] produces an artifact.
    pub fn handle(&mut self, event: SurfaceEvent) -> DrawResult<Option<ExportArtifact>> {
        self.handle_at(event, time::timestamp_millis())
    }

    /// Like [`Self::handle`] with an explicit clock reading for exports
    pub fn handle_at(
        &mut self,
        event: SurfaceEvent,
        now_ms: u64,
    ) -> DrawResult<Option<ExportArtifact>> {
        match event {
            SurfaceEvent::PointerDown(pos) => self.pointer_down(pos),
            SurfaceEvent::PointerMove(pos) => self.pointer_move(pos),
            SurfaceEvent::PointerUp => self.pointer_up(),
            SurfaceEvent::Resize { width, height } => self.resize(width, height)?,
            SurfaceEvent::Control(control) => match control {
                ControlEvent::SetLineWidth(width) => self.set_line_width(width),
                ControlEvent::SelectSwatch(index) => {
                    self.select_swatch(index);
                }
                ControlEvent::SetMode(mode) => self.set_mode(mode),
                ControlEvent::Clear => self.clear(),
                ControlEvent::Export => return Ok(Some(self.export_at(now_ms)?)),
            },
        }
        Ok(None)
    }

    /// Handle every pending event from `input`, in order.
    ///
    /// Failures are logged and do not stop the remaining events.
    pub fn drain<I: InputSource + ?Sized>(&mut self, input: &mut I) -> Vec<ExportArtifact> {
        let mut artifacts = Vec::new();
        while let Some(event) = input.next_event() {
            match self.handle(event) {
                Ok(Some(artifact)) => artifacts.push(artifact),
                Ok(None) => {}
                Err(err) => log::error!("Failed to handle {:?}: {}", event, err),
            }
        }
        artifacts
    }

    /// Start a gesture and leave a dot so a single tap is visible
    pub fn pointer_down(&mut self, pos: Pos2) {
        self.gesture.begin(pos);
        let style = self.settings.stroke_style();
        self.sink.draw_dot(pos, &style);
    }

    /// Extend the current gesture; ignored while idle
    pub fn pointer_move(&mut self, pos: Pos2) {
        if let Some((from, to)) = self.gesture.advance(pos) {
            let style = self.settings.stroke_style();
            self.sink.draw_line(from, to, &style);
        }
    }

    pub fn pointer_up(&mut self) {
        self.gesture.end();
    }

    /// Match the surface to a new viewport size.
    ///
    /// The gesture is left alone, so the next move continues from a point
    /// drawn before the resize.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        if self.sink.size() == [width, height] {
            return Ok(());
        }
        self.sink
            .resize(width, height, self.background, self.resize_policy)?;
        log::debug!(
            "Surface resized to {}x{} ({:?})",
            width,
            height,
            self.resize_policy
        );
        Ok(())
    }

    pub fn set_line_width(&mut self, width: f32) {
        if !width.is_finite() {
            log::warn!("Ignoring non-finite line width {}", width);
            return;
        }
        self.settings.line_width = width;
    }

    /// Pick a palette color; also switches back to the brush.
    /// Returns `false` for an unknown swatch.
    pub fn select_swatch(&mut self, index: usize) -> bool {
        match self.palette.select(index) {
            Some(color) => {
                self.settings.color = color;
                self.settings.mode = BrushMode::Brush;
                true
            }
            None => {
                log::warn!(
                    "Ignoring swatch {} (palette has {})",
                    index,
                    self.palette.len()
                );
                false
            }
        }
    }

    pub fn set_mode(&mut self, mode: BrushMode) {
        if self.settings.mode != mode {
            log::info!("Switched to {:?}", mode);
        }
        self.settings.mode = mode;
    }

    /// Blank the whole surface regardless of mode and brush
    pub fn clear(&mut self) {
        if self.clear_to_transparent {
            self.sink.clear();
        } else {
            self.sink.fill(self.background);
        }
        log::info!("Surface cleared");
    }

    pub fn export(&mut self) -> Result<ExportArtifact, ExportError> {
        self.export_at(time::timestamp_millis())
    }

    pub fn export_at(&mut self, now_ms: u64) -> Result<ExportArtifact, ExportError> {
        let artifact = self.exporter.export(&self.sink, now_ms)?;
        log::info!(
            "Exported {} ({} bytes)",
            artifact.file_name(),
            artifact.bytes().len()
        );
        Ok(artifact)
    }
}
