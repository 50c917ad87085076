use crate::models::{
    ChartConfig, ChartOptions, ChartPayload, Dataset, Decimation, DecimationAlgorithm, Legend,
    LinearScale, Plugins, Scales, SeriesStyle, TickOptions, TimeScale, PALETTE,
};
use crate::render::{self, RenderOutput, RenderTarget};
use crate::services::{series_service, style_service};
use crate::utils::ChartError;

/// Assemble the single-series chart configuration
pub fn assemble_config(payload: &ChartPayload, style: SeriesStyle, options: ChartOptions) -> ChartConfig {
    let dataset = Dataset {
        label: payload.base_asset.clone(),
        data: series_service::map_series(payload),
        background: style.fill,
        border_color: style.border_color,
        border_width: style.border_width,
        point_radius: style.point_radius,
        tension: style.tension,
    };

    ChartConfig {
        dataset,
        scales: Scales {
            x: TimeScale {
                ticks: TickOptions {
                    auto_skip: true,
                    max_rotation: 0,
                },
                title: Some("Time".to_string()),
            },
            y: LinearScale {
                title: Some("Profit (Price)".to_string()),
            },
        },
        plugins: Plugins {
            decimation: Decimation {
                enabled: true,
                algorithm: DecimationAlgorithm::Lttb,
                samples: 1,
                threshold: None,
            },
            legend: Legend { display: true },
        },
        options,
    }
}

/// Map, style, configure and render a payload exactly once
pub fn render_chart(payload: &ChartPayload, target: &RenderTarget) -> Result<RenderOutput, ChartError> {
    render_chart_with_options(payload, target, ChartOptions::default())
}

pub fn render_chart_with_options(
    payload: &ChartPayload,
    target: &RenderTarget,
    options: ChartOptions,
) -> Result<RenderOutput, ChartError> {
    tracing::info!(
        "🎨 Rendering profit chart for {} ({} entries)",
        payload.base_asset,
        payload.chart_data.len()
    );
    // The gradient is stored by value in the dataset, so it is built first
    let style = style_service::build_style(&PALETTE);
    let config = assemble_config(payload, style, options);
    render::render_config(&config, target)
}
