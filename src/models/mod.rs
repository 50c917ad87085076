//! Data models for the profit chart pipeline
//!
//! Payload and point types, the fixed palette, series styling and the
//! assembled chart configuration.

pub mod chart;
pub mod config;
pub mod palette;
pub mod style;

pub use chart::{ChartPayload, PlotPoint, ProfitValue, RawPoint, TimeValue};
pub use config::{
    ChartConfig, ChartOptions, Dataset, Decimation, DecimationAlgorithm, Legend, LinearScale,
    Plugins, Scales, TickOptions, TimeScale,
};
pub use palette::{Palette, Shades, PALETTE};
pub use style::{LinearGradient, SeriesStyle};
