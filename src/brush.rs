use egui::Color32;

use crate::config::DrawingConfig;
use crate::stroke::{Ink, StrokeStyle};

/// Whether strokes paint or erase
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum BrushMode {
    #[default]
    Brush,
    Eraser,
}

impl BrushMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Brush => "🖌 Brush",
            Self::Eraser => "⌫ Eraser",
        }
    }
}

/// The settings every stroke segment is rendered with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSettings {
    pub color: Color32,
    pub line_width: f32,
    pub mode: BrushMode,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            line_width: 4.0,
            mode: BrushMode::Brush,
        }
    }
}

impl BrushSettings {
    pub fn from_config(config: &DrawingConfig) -> Self {
        Self {
            color: config.default_color.0,
            line_width: config.line_width.default,
            mode: BrushMode::Brush,
        }
    }

    /// Style for the next segment; the eraser ignores `color`
    pub fn stroke_style(&self) -> StrokeStyle {
        let ink = match self.mode {
            BrushMode::Brush => Ink::Paint(self.color),
            BrushMode::Eraser => Ink::Erase,
        };
        StrokeStyle {
            width: self.line_width,
            ink,
        }
    }
}

/// Fixed set of swatches, one of which is selected
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color32>,
    selected: usize,
}

impl Palette {
    /// `selected` is clamped to the last swatch
    pub fn new(colors: Vec<Color32>, selected: usize) -> Self {
        let selected = selected.min(colors.len().saturating_sub(1));
        Self { colors, selected }
    }

    pub fn from_config(config: &DrawingConfig) -> Self {
        Self::new(config.palette_colors(), config.default_swatch().unwrap_or(0))
    }

    pub fn colors(&self) -> &[Color32] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Select a swatch, returning its color, or `None` for an unknown index
    pub fn select(&mut self, index: usize) -> Option<Color32> {
        let color = *self.colors.get(index)?;
        self.selected = index;
        Some(color)
    }

    /// The swatch shown as active: none while erasing
    pub fn active_swatch(&self, mode: BrushMode) -> Option<usize> {
        match mode {
            BrushMode::Brush if !self.colors.is_empty() => Some(self.selected),
            _ => None,
        }
    }
}
