//! Assembled chart configuration handed to the renderer

use plotters::style::{RGBAColor, RGBColor};

use super::chart::PlotPoint;
use super::palette::{GLOW_COLOR, TEXT_COLOR};
use super::style::LinearGradient;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub dataset: Dataset,
    pub scales: Scales,
    pub plugins: Plugins,
    pub options: ChartOptions,
}

/// The single line series
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<PlotPoint>,
    pub background: LinearGradient,
    pub border_color: RGBAColor,
    pub border_width: u32,
    pub point_radius: u32,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scales {
    pub x: TimeScale,
    pub y: LinearScale,
}

/// x tick generation; ticks always come from the picked time unit
#[derive(Debug, Clone, PartialEq)]
pub struct TickOptions {
    /// Drop labels that do not fit; off labels every distinct timestamp
    pub auto_skip: bool,
    /// Labels turn on their side at 90 or more, otherwise they stay flat
    pub max_rotation: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeScale {
    pub ticks: TickOptions,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimationAlgorithm {
    /// Largest-Triangle-Three-Buckets
    Lttb,
    /// Keeps first, min, max and last point of every pixel column
    MinMax,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decimation {
    pub enabled: bool,
    pub algorithm: DecimationAlgorithm,
    /// Samples per pixel bucket for LTTB
    pub samples: usize,
    /// Point count above which decimation kicks in; `None` means 4 x plot width
    pub threshold: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub display: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plugins {
    pub decimation: Decimation,
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Recorded only, a static render has a single frame
    pub animation: bool,
    /// Points still need parsing; decimation only runs when this is off
    pub parsing: bool,
    /// Fill the container inside the page border instead of a fixed 450x300 canvas
    pub responsive: bool,
    /// Cap the canvas height at half its width
    pub maintain_aspect_ratio: bool,
    pub layout_padding: u32,
    pub text_color: RGBColor,
    pub background_color: RGBColor,
    /// Glow around the line; `None` disables it
    pub shadow_color: Option<RGBColor>,
}

/// Dark background standing in for the transparent page behind the chart
pub const BACKGROUND_COLOR: RGBColor = RGBColor(0x31, 0x33, 0x38);

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            animation: false,
            parsing: false,
            responsive: true,
            maintain_aspect_ratio: false,
            layout_padding: 10,
            text_color: TEXT_COLOR,
            background_color: BACKGROUND_COLOR,
            shadow_color: Some(GLOW_COLOR),
        }
    }
}
