#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod brush;
pub mod components;
pub mod config;
pub mod controller;
pub mod download;
pub mod error;
pub mod export;
pub mod input;
pub mod leave_guard;
pub mod panels;
pub mod stroke;
pub mod surface;
pub mod texture;
pub mod util;

pub use app::DrawingApp;
pub use brush::{BrushMode, BrushSettings, Palette};
pub use config::DrawingConfig;
pub use controller::DrawingController;
pub use error::{DrawError, ExportError, SurfaceError};
pub use export::ExportArtifact;
pub use input::{ControlEvent, EguiInput, InputSource, SurfaceEvent};
pub use stroke::{GestureState, Ink, StrokeStyle};
pub use surface::{RasterSink, ResizePolicy, Surface};
