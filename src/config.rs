use std::path::PathBuf;

use plotters::style::RGBColor;

use crate::models::palette::{parse_hex_color, GLOW_COLOR};
use crate::render::{OutputFormat, RenderTarget};
use crate::utils::ChartError;

/// Runtime settings read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub target: RenderTarget,
    pub output: Option<PathBuf>,
    pub shadow_color: Option<RGBColor>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ChartError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup, unset keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ChartError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RenderTarget::default();
        let width = parse_size(lookup("PROFIT_CHART_WIDTH"), "PROFIT_CHART_WIDTH", defaults.width)?;
        let height = parse_size(lookup("PROFIT_CHART_HEIGHT"), "PROFIT_CHART_HEIGHT", defaults.height)?;
        let format = match lookup("PROFIT_CHART_FORMAT") {
            Some(value) => value.parse::<OutputFormat>()?,
            None => defaults.format,
        };
        let output = lookup("PROFIT_CHART_OUTPUT")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let shadow_color = match lookup("PROFIT_CHART_SHADOW") {
            None => Some(GLOW_COLOR),
            Some(value) if value.trim().eq_ignore_ascii_case("none") => None,
            Some(value) => Some(parse_hex_color(&value).ok_or_else(|| {
                ChartError::Config(format!("PROFIT_CHART_SHADOW must be a #rrggbb color or 'none', got '{}'", value))
            })?),
        };

        tracing::debug!("Settings: {}x{} {:?}, output {:?}", width, height, format, output);
        Ok(Self {
            target: RenderTarget { width, height, format },
            output,
            shadow_color,
        })
    }
}

fn parse_size(value: Option<String>, key: &str, default: u32) -> Result<u32, ChartError> {
    match value {
        None => Ok(default),
        Some(v) => match v.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ChartError::Config(format!("{} must be a positive integer, got '{}'", key, v))),
        },
    }
}
