//! Profit chart rendering
//!
//! Decodes a bot's profit history from a percent-encoded JSON fragment and
//! renders it as a single glowing line chart with a gradient fill.

pub mod config;
pub mod models;
pub mod render;
pub mod services;
pub mod utils;

pub use models::ChartPayload;
pub use render::{OutputFormat, RenderOutput, RenderTarget};
pub use services::chart_service::{assemble_config, render_chart};
pub use utils::ChartError;
