use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::Utc;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontTransform, RGBAColor};
use uuid::Uuid;

use super::axis;
use super::canvas::Canvas;
use super::line::{self, LineRenderer};
use crate::models::{ChartConfig, ChartOptions, Dataset};
use crate::services::decimation_service;
use crate::utils::ChartError;

/// Border between the target edge and the chart container
pub const PAGE_BORDER: u32 = 15;
/// Canvas size of a chart that does not follow its container
pub const FIXED_CANVAS: (u32, u32) = (450, 300);
/// Width to height ratio kept when the aspect ratio is maintained
const ASPECT_RATIO: u32 = 2;

const FONT_SIZE: f64 = 12.0;
const LEGEND_HEIGHT: u32 = 24;
const LEGEND_BOX: (i32, i32) = (40, 12);
const X_LABEL_AREA: u32 = 40;
const ROTATED_X_LABEL_AREA: u32 = 80;
const Y_LABEL_AREA: u32 = 60;
const GRID_COLOR: RGBAColor = RGBAColor(255, 255, 255, 0.1);
const AXIS_COLOR: RGBAColor = RGBAColor(255, 255, 255, 0.25);
const NO_LINE: RGBAColor = RGBAColor(0, 0, 0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            other => Err(ChartError::Config(format!(
                "Unknown output format '{}'. Supported: png, svg",
                other
            ))),
        }
    }
}

/// Where and how the chart is drawn; the chart fills the whole target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTarget {
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

impl Default for RenderTarget {
    /// 450x300 chart container with a 15px border on every side
    fn default() -> Self {
        Self {
            width: FIXED_CANVAS.0 + PAGE_BORDER * 2,
            height: FIXED_CANVAS.1 + PAGE_BORDER * 2,
            format: OutputFormat::Png,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// Render a chart configuration into an encoded image
pub fn render_config(config: &ChartConfig, target: &RenderTarget) -> Result<RenderOutput, ChartError> {
    if target.width == 0 || target.height == 0 {
        return Err(ChartError::InvalidTarget(format!(
            "target size must be non-zero, got {}x{}",
            target.width, target.height
        )));
    }
    let size = (target.width, target.height);

    let bytes = match target.format {
        OutputFormat::Png => encode_png(&std::env::temp_dir(), size, config)?,
        OutputFormat::Svg => {
            let mut buffer = String::new();
            {
                let root = SVGBackend::with_string(&mut buffer, size).into_drawing_area();
                draw_chart(&root, config)?;
                root.present().map_err(render_err)?;
            }
            buffer.into_bytes()
        }
    };

    tracing::info!(
        "Rendered {}x{} {} chart ({} bytes)",
        target.width,
        target.height,
        target.format.extension(),
        bytes.len()
    );
    Ok(RenderOutput {
        format: target.format,
        bytes,
    })
}

/// BitMapBackend encodes PNG only when writing to a file, so the chart goes
/// through a uuid-named file in `dir` that is removed afterwards
fn encode_png(dir: &Path, size: (u32, u32), config: &ChartConfig) -> Result<Vec<u8>, ChartError> {
    let temp_file = dir.join(format!("profit_chart_{}.png", Uuid::new_v4()));
    let drawn = draw_png(&temp_file, size, config);
    let image_data = drawn.and_then(|_| fs::read(&temp_file).map_err(ChartError::from));
    let _ = fs::remove_file(&temp_file);
    image_data
}

fn draw_png(path: &Path, size: (u32, u32), config: &ChartConfig) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw_chart(&root, config)?;
    root.present().map_err(render_err)
}

/// Size of the chart canvas inside a target of `target` pixels
///
/// A responsive chart fills the container left inside the page border,
/// otherwise it keeps the fixed canvas size (cut to the container).
/// Maintaining the aspect ratio caps the height at half the width.
pub fn canvas_size(target: (u32, u32), options: &ChartOptions) -> (u32, u32) {
    let container = (
        target.0.saturating_sub(2 * PAGE_BORDER),
        target.1.saturating_sub(2 * PAGE_BORDER),
    );
    let (width, height) = if options.responsive {
        container
    } else {
        (FIXED_CANVAS.0.min(container.0), FIXED_CANVAS.1.min(container.1))
    };
    if options.maintain_aspect_ratio {
        (width, height.min(width / ASPECT_RATIO))
    } else {
        (width, height)
    }
}

/// Decimation needs pre-parsed points sorted by time
fn drawable_points(resolved: Vec<(i64, f64)>, config: &ChartConfig, plot_width: usize) -> Vec<(i64, f64)> {
    if config.options.parsing {
        tracing::debug!("Series still needs parsing, decimation skipped");
        resolved
    } else if resolved.windows(2).all(|w| w[0].0 <= w[1].0) {
        decimation_service::decimate(&resolved, &config.plugins.decimation, plot_width)
    } else {
        tracing::debug!("Series is not sorted by time, decimation skipped");
        resolved
    }
}

fn too_small(width: u32, height: u32) -> ChartError {
    ChartError::InvalidTarget(format!("{}x{} target leaves no room for the plot area", width, height))
}

/// Draw the whole chart onto a root drawing area
pub fn draw_chart<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, config: &ChartConfig) -> Result<(), ChartError> {
    let options = &config.options;
    let dataset = &config.dataset;
    let ticks = &config.scales.x.ticks;
    let padding = options.layout_padding;
    let legend_height = if config.plugins.legend.display { LEGEND_HEIGHT } else { 0 };
    let rotated = ticks.max_rotation >= 90;
    let x_label_area = if rotated { ROTATED_X_LABEL_AREA } else { X_LABEL_AREA };

    // Room taken around the plot area by padding, legend and labels
    let reserved_w = 2 * padding + Y_LABEL_AREA;
    let reserved_h = 2 * padding + legend_height + x_label_area;
    let (target_w, target_h) = root.dim_in_pixel();
    let (width, height) = canvas_size((target_w, target_h), options);
    if width <= reserved_w || height <= reserved_h {
        return Err(too_small(target_w, target_h));
    }
    root.fill(&options.background_color).map_err(render_err)?;
    let area = root.clone().shrink((PAGE_BORDER, PAGE_BORDER), (width, height));

    let mut resolved: Vec<(i64, f64)> = Vec::with_capacity(dataset.data.len());
    for point in &dataset.data {
        match point.x.to_millis() {
            Some(ms) => resolved.push((ms, point.y)),
            None => tracing::warn!("Skipping point with unrecognised timestamp {:?}", point.x),
        }
    }

    let plot_height_estimate = height - reserved_h;

    let xs: Vec<i64> = resolved.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = resolved.iter().map(|p| p.1).collect();
    let (x_min, x_max) = axis::x_bounds(&xs, Utc::now());
    let (y_min, y_max) = axis::y_bounds(&ys, axis::y_tick_count(plot_height_estimate));
    tracing::debug!("Chart ranges x={}..{} y={}..{}", x_min, x_max, y_min, y_max);

    let mut chart = ChartBuilder::on(&area)
        .margin(padding)
        .margin_top(padding + legend_height)
        .x_label_area_size(x_label_area)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(render_err)?;

    let (x_range, y_range) = chart.plotting_area().get_pixel_range();
    if x_range.is_empty() || y_range.is_empty() {
        return Err(too_small(target_w, target_h));
    }

    let (plot_w, plot_h) = chart.plotting_area().dim_in_pixel();
    let x_ticks = if ticks.auto_skip {
        axis::x_tick_count(plot_w, rotated)
    } else {
        let mut distinct = xs;
        distinct.sort_unstable();
        distinct.dedup();
        distinct.len().max(2)
    };
    let unit = axis::pick_unit(x_max.saturating_sub(x_min), x_ticks);
    let text_style = ("sans-serif", FONT_SIZE).into_font().color(&options.text_color);
    let x_formatter = |ms: &i64| axis::format_tick(*ms, unit);
    let y_formatter = |v: &f64| axis::format_value(*v);

    {
        let mut mesh = chart.configure_mesh();
        mesh.x_labels(x_ticks)
            .y_labels(axis::y_tick_count(plot_h))
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .label_style(text_style.clone())
            .axis_desc_style(text_style.clone())
            .bold_line_style(GRID_COLOR.stroke_width(1))
            .light_line_style(NO_LINE.stroke_width(0))
            .axis_style(AXIS_COLOR.stroke_width(1));
        if rotated {
            mesh.x_label_style(text_style.transform(FontTransform::Rotate90));
        }
        if let Some(title) = &config.scales.x.title {
            mesh.x_desc(title.as_str());
        }
        if let Some(title) = &config.scales.y.title {
            mesh.y_desc(title.as_str());
        }
        mesh.draw().map_err(render_err)?;
    }

    let points = drawable_points(resolved, config, plot_w as usize);

    // Non-finite values break the line into separate runs
    let runs: Vec<Vec<(f64, f64)>> = points
        .split(|p| !p.1.is_finite())
        .filter(|run| !run.is_empty())
        .map(|run| {
            run.iter()
                .map(|&(x, y)| {
                    let (px, py) = chart.backend_coord(&(x, y.clamp(y_min, y_max)));
                    (px as f64, py as f64)
                })
                .collect()
        })
        .collect();

    let baseline = chart.backend_coord(&(x_min, 0.0_f64.clamp(y_min, y_max))).1;
    let paths: Vec<Vec<(i32, i32)>> = runs
        .iter()
        .map(|run| line::smooth_run(run, dataset.tension, &x_range, &y_range))
        .collect();

    // Gradient rows are canvas rows; the canvas sits inside the page border
    let fill = dataset.background.offset(area.get_base_pixel().1 as f64);
    let mut canvas = Canvas::new(root);
    for path in &paths {
        let columns = line::fill_columns(path, baseline, &x_range, &y_range);
        canvas.fill_columns(&columns, &fill)?;
    }

    let renderer = LineRenderer::for_options(options);
    renderer.draw(&mut canvas, &paths, dataset.border_color, dataset.border_width)?;

    let markers: Vec<(i32, i32)> = runs
        .iter()
        .flatten()
        .map(|(x, y)| (x.round() as i32, y.round() as i32))
        .collect();
    renderer.draw_points(&canvas, &markers, dataset.border_color, dataset.point_radius)?;

    if config.plugins.legend.display {
        draw_legend(&area, dataset, &text_style, width, padding)?;
    }
    Ok(())
}

/// Legend box and label centred above the plot
fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    dataset: &Dataset,
    text_style: &TextStyle,
    width: u32,
    padding: u32,
) -> Result<(), ChartError> {
    let (text_w, text_h) = area
        .estimate_text_size(&dataset.label, text_style)
        .map_err(render_err)?;
    let (box_w, box_h) = LEGEND_BOX;
    let total = box_w + 10 + text_w as i32;
    let x0 = (width as i32 - total) / 2;
    let y0 = padding as i32 + (LEGEND_HEIGHT as i32 - box_h) / 2;

    let upper_left = (x0, y0);
    let lower_right = (x0 + box_w, y0 + box_h);
    area.draw(&Rectangle::new(
        [upper_left, lower_right],
        dataset.background.color_at(y0 as f64).filled(),
    ))
    .map_err(render_err)?;
    area.draw(&Rectangle::new(
        [upper_left, lower_right],
        dataset.border_color.stroke_width(dataset.border_width),
    ))
    .map_err(render_err)?;

    let text_y = y0 + (box_h - text_h as i32) / 2;
    area.draw(&Text::new(
        dataset.label.as_str(),
        (x0 + box_w + 10, text_y),
        text_style.clone(),
    ))
    .map_err(render_err)
}

/// Whether the label font resolves on this system
#[cfg(test)]
pub(crate) fn font_available() -> bool {
    ("sans-serif", FONT_SIZE).into_font().box_size("0").is_ok()
}
