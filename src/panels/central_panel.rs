use eframe::egui;

/// Full-bleed canvas area showing the surface texture.
///
/// The background is painted underneath so erased (transparent) pixels
/// show the background color.
pub fn central_panel(
    ctx: &egui::Context,
    background: egui::Color32,
    texture: &egui::TextureHandle,
) {
    let frame = egui::Frame::none().fill(background);
    egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
        let canvas_rect = ui.max_rect();
        let response = ui.allocate_rect(canvas_rect, egui::Sense::drag());

        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        ui.painter()
            .image(texture.id(), canvas_rect, uv, egui::Color32::WHITE);

        if response.hovered() {
            ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
        }
    });
}
