use crate::config::DrawingConfig;
use crate::controller::DrawingController;
use crate::download::Downloader;
use crate::error::SurfaceError;
use crate::export::ExportArtifact;
use crate::input::EguiInput;
use crate::leave_guard::LeaveGuard;
use crate::panels::{self, ToolbarState};
use crate::surface::Surface;
use crate::texture::SurfaceTexture;

/// The drawing board window: a toolbar on top and the canvas below
pub struct DrawingApp {
    controller: DrawingController<Surface>,
    input: EguiInput,
    texture: SurfaceTexture,
    downloader: Downloader,
    leave_guard: LeaveGuard,
    config: DrawingConfig,
}

impl DrawingApp {
    /// Called once before the first frame.
    ///
    /// The surface starts at 1x1 and is sized to the canvas on the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: DrawingConfig) -> Result<Self, SurfaceError> {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self::with_config(config)
    }

    /// Build the app without a window, e.g. for tests
    pub fn with_config(config: DrawingConfig) -> Result<Self, SurfaceError> {
        let surface = Surface::new(1, 1)?;
        let leave_guard = LeaveGuard::new(config.confirm_before_leaving);
        leave_guard.install();

        Ok(Self {
            controller: DrawingController::new(surface, &config),
            input: EguiInput::new(),
            texture: SurfaceTexture::new(),
            downloader: Downloader::new(config.export_dir.clone()),
            leave_guard,
            config,
        })
    }

    pub fn controller(&self) -> &DrawingController<Surface> {
        &self.controller
    }

    fn toolbar_state(&self) -> ToolbarState<'_> {
        ToolbarState {
            mode: self.controller.mode(),
            palette: self.controller.palette(),
            active_swatch: self.controller.active_swatch(),
            line_width: self.controller.settings().line_width,
            width_range: self.config.line_width,
        }
    }

    fn deliver(&self, artifact: &ExportArtifact) {
        if let Err(err) = self.downloader.deliver(artifact) {
            log::error!("Failed to deliver {}: {}", artifact.file_name(), err);
        }
    }
}

impl eframe::App for DrawingApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.leave_guard.show(ctx);

        for event in panels::tools_panel(ctx, self.toolbar_state()) {
            self.input.push(event);
        }

        // whatever the toolbar left over is the canvas
        let canvas_rect = ctx.available_rect();
        self.input
            .gather(ctx, canvas_rect, !self.leave_guard.is_asking());

        for artifact in self.controller.drain(&mut self.input) {
            self.deliver(&artifact);
        }

        let texture = self.texture.sync(ctx, self.controller.sink());
        panels::central_panel(ctx, self.controller.background(), texture);
    }
}
