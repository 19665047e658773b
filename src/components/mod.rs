mod swatch_button;
mod tool_button;

pub use swatch_button::SwatchButton;
pub use tool_button::ToolButton;
