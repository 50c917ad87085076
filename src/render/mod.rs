//! Drawing of the profit chart on top of plotters

pub mod axis;
pub mod canvas;
pub mod hooks;
pub mod line;
pub mod renderer;

pub use renderer::{render_config, OutputFormat, RenderOutput, RenderTarget};
