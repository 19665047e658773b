use eframe::egui;

/// A clickable color square, outlined when it is the active swatch
pub struct SwatchButton {
    pub color: egui::Color32,
    pub selected: bool,
}

impl SwatchButton {
    pub fn new(color: egui::Color32, selected: bool) -> Self {
        Self { color, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let size = egui::vec2(24.0, 24.0);
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            ui.painter().rect_filled(rect.shrink(2.0), 4.0, self.color);

            if self.selected {
                ui.painter().rect_stroke(
                    rect,
                    4.0,
                    egui::Stroke::new(2.0, egui::Color32::from_rgb(33, 150, 243)),
                );
            } else if response.hovered() {
                ui.painter()
                    .rect_stroke(rect, 4.0, egui::Stroke::new(1.0, egui::Color32::GRAY));
            }
        }

        response
    }
}
