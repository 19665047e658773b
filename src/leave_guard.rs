use eframe::egui;

/// Asks for confirmation before the drawing is thrown away by leaving.
///
/// In the browser this is a `beforeunload` hook; natively the window close
/// request is cancelled until the user confirms in a modal.
#[derive(Debug, Default)]
pub struct LeaveGuard {
    enabled: bool,
    asking: bool,
    confirmed: bool,
}

impl LeaveGuard {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    /// True while the confirmation modal is up
    pub fn is_asking(&self) -> bool {
        self.asking
    }

    /// Install the browser hook; a no-op on native targets
    pub fn install(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            if self.enabled {
                if let Err(err) = web::install_before_unload() {
                    log::error!("Failed to install beforeunload hook: {:?}", err);
                }
            }
        }
    }

    /// Intercept a close request. Returns true if the request was held back.
    pub fn on_close_requested(&mut self) -> bool {
        if !self.enabled || self.confirmed {
            return false;
        }
        self.asking = true;
        true
    }

    pub fn confirm(&mut self) {
        self.asking = false;
        self.confirmed = true;
    }

    pub fn stay(&mut self) {
        self.asking = false;
    }

    /// Poll the viewport for close requests and show the modal when asking
    pub fn show(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.viewport().close_requested()) && self.on_close_requested() {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }

        if !self.asking {
            return;
        }

        egui::Window::new("Leave the drawing board?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Anything you have not exported will be lost.");
                ui.horizontal(|ui| {
                    if ui.button("Leave").clicked() {
                        self.confirm();
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                    if ui.button("Stay").clicked() {
                        self.stay();
                    }
                });
            });
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::{JsCast as _, JsValue, closure::Closure};

    pub fn install_before_unload() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let on_before_unload = Closure::<dyn FnMut(web_sys::BeforeUnloadEvent)>::new(
            |event: web_sys::BeforeUnloadEvent| {
                event.prevent_default();
                event.set_return_value("");
            },
        );
        window.add_event_listener_with_callback(
            "beforeunload",
            on_before_unload.as_ref().unchecked_ref(),
        )?;
        // lives as long as the page
        on_before_unload.forget();
        Ok(())
    }
}
