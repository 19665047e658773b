use eframe::egui;

use crate::brush::BrushMode;

/// One half of the brush/eraser toggle
pub struct ToolButton {
    pub mode: BrushMode,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(mode: BrushMode, selected: bool) -> Self {
        Self { mode, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        ui.selectable_label(self.selected, self.mode.label())
            .on_hover_text(match self.mode {
                BrushMode::Brush => "Paint with the selected color",
                BrushMode::Eraser => "Erase to transparent",
            })
    }
}
