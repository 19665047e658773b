use egui::Pos2;
use std::collections::VecDeque;

use crate::brush::BrushMode;

mod egui_source;
pub use egui_source::EguiInput;

/// A toolbar interaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    SetLineWidth(f32),
    SelectSwatch(usize),
    SetMode(BrushMode),
    Clear,
    Export,
}

/// Everything the drawing controller reacts to.
///
/// Pointer positions are in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    PointerDown(Pos2),
    PointerMove(Pos2),
    PointerUp,
    /// The viewport now measures `width` x `height` pixels
    Resize { width: u32, height: u32 },
    Control(ControlEvent),
}

impl From<ControlEvent> for SurfaceEvent {
    fn from(event: ControlEvent) -> Self {
        Self::Control(event)
    }
}

/// The input boundary of the drawing controller: a stream of events
pub trait InputSource {
    /// Next pending event, or `None` once drained
    fn next_event(&mut self) -> Option<SurfaceEvent>;
}

impl InputSource for VecDeque<SurfaceEvent> {
    fn next_event(&mut self) -> Option<SurfaceEvent> {
        self.pop_front()
    }
}
