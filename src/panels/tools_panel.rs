use eframe::egui;

use crate::brush::{BrushMode, Palette};
use crate::components::{SwatchButton, ToolButton};
use crate::config::LineWidthConfig;
use crate::input::ControlEvent;

/// What the toolbar needs to draw itself
#[derive(Debug, Clone, Copy)]
pub struct ToolbarState<'a> {
    pub mode: BrushMode,
    pub palette: &'a Palette,
    pub active_swatch: Option<usize>,
    pub line_width: f32,
    pub width_range: LineWidthConfig,
}

/// Top bar with mode toggle, palette, width slider, clear and export.
/// Returns the control events triggered this frame.
pub fn tools_panel(ctx: &egui::Context, state: ToolbarState<'_>) -> Vec<ControlEvent> {
    let mut events = Vec::new();

    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            for mode in [BrushMode::Brush, BrushMode::Eraser] {
                if ToolButton::new(mode, state.mode == mode).show(ui).clicked() {
                    events.push(ControlEvent::SetMode(mode));
                }
            }

            ui.separator();

            for (index, color) in state.palette.colors().iter().enumerate() {
                let selected = state.active_swatch == Some(index);
                if SwatchButton::new(*color, selected).show(ui).clicked() {
                    events.push(ControlEvent::SelectSwatch(index));
                }
            }

            ui.separator();

            let mut width = state.line_width;
            let range = state.width_range.min..=state.width_range.max;
            let slider = egui::Slider::new(&mut width, range)
                .integer()
                .text("Width");
            if ui.add(slider).changed() {
                events.push(ControlEvent::SetLineWidth(width));
            }

            ui.separator();

            if ui.button("🗑 Clear").clicked() {
                events.push(ControlEvent::Clear);
            }
            if ui.button("💾 Save").clicked() {
                events.push(ControlEvent::Export);
            }
        });
    });

    if !events.is_empty() {
        log::debug!("Toolbar events: {:?}", events);
    }
    events
}
