use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming a JSON config file for the native binary
pub const CONFIG_ENV_VAR: &str = "DRAWING_BOARD_CONFIG";

/// Errors that can occur while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid color {0:?}, expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("default color {0} is not part of the palette")]
    DefaultColorNotInPalette(HexColor),

    #[error("invalid line width range {min}..={max}")]
    InvalidWidthRange { min: f32, max: f32 },

    #[error("default line width {value} is outside {min}..={max}")]
    DefaultWidthOutOfRange { value: f32, min: f32, max: f32 },
}

/// A color that (de)serializes as a `#rrggbb` / `#rrggbbaa` string
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub Color32);

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Color32::from_rgb(r, g, b))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color32::from_hex(value.trim())
            .map(Self)
            .map_err(|_| ConfigError::InvalidColor(value))
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b, a] = self.0.to_srgba_unmultiplied();
        if a == u8::MAX {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

/// Range and starting value of the width slider
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineWidthConfig {
    pub default: f32,
    pub min: f32,
    pub max: f32,
}

impl Default for LineWidthConfig {
    fn default() -> Self {
        Self {
            default: 4.0,
            min: 1.0,
            max: 20.0,
        }
    }
}

/// Everything the drawing board lets you tune before start-up
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing keys fall back to the defaults below
pub struct DrawingConfig {
    /// Fill applied to a fresh (or resized) surface
    pub background: HexColor,
    /// Brush color at start-up, must be one of `palette`
    pub default_color: HexColor,
    pub palette: Vec<HexColor>,
    pub line_width: LineWidthConfig,
    /// Exported files are named `<export_prefix><millis>.png`
    pub export_prefix: String,
    /// Directory exports are written to on native targets
    pub export_dir: Option<PathBuf>,
    /// Clear leaves a transparent surface instead of re-filling the background
    pub clear_to_transparent: bool,
    /// Copy existing pixels into the new surface on resize
    pub preserve_on_resize: bool,
    pub confirm_before_leaving: bool,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            background: HexColor::rgb(255, 255, 255),
            default_color: HexColor::rgb(0, 0, 0),
            palette: vec![
                HexColor::rgb(0, 0, 0),
                HexColor::rgb(255, 0, 0),
                HexColor::rgb(0, 255, 0),
                HexColor::rgb(0, 0, 255),
            ],
            line_width: LineWidthConfig::default(),
            export_prefix: "drawing-".to_owned(),
            export_dir: None,
            clear_to_transparent: false,
            preserve_on_resize: false,
            confirm_before_leaving: true,
        }
    }
}

impl DrawingConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], or fall back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::error!("Ignoring config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.default_swatch().is_none() {
            return Err(ConfigError::DefaultColorNotInPalette(self.default_color));
        }

        let LineWidthConfig { default, min, max } = self.line_width;
        if !(min > 0.0 && min <= max) {
            return Err(ConfigError::InvalidWidthRange { min, max });
        }
        if !(min..=max).contains(&default) {
            return Err(ConfigError::DefaultWidthOutOfRange { value: default, min, max });
        }
        Ok(())
    }

    /// Index of `default_color` inside `palette`
    pub fn default_swatch(&self) -> Option<usize> {
        self.palette.iter().position(|c| *c == self.default_color)
    }

    pub fn palette_colors(&self) -> Vec<Color32> {
        self.palette.iter().map(|c| c.0).collect()
    }
}
