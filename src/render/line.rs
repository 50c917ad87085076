//! Line series drawing: smoothing, area fill geometry and hooked strokes

use std::collections::BTreeMap;
use std::ops::Range;

use plotters::prelude::*;
use plotters::style::RGBAColor;

use super::canvas::{Canvas, ColumnSpan};
use super::hooks::{GlowHook, StrokeHook};
use crate::models::ChartOptions;
use crate::utils::ChartError;

const CURVE_STEPS: usize = 8;

type Pt = (f64, f64);

/// Control points before and after `cur` for a cardinal-style curve
fn spline_curve(prev: Pt, cur: Pt, next: Pt, tension: f64) -> (Pt, Pt) {
    let d01 = ((cur.0 - prev.0).powi(2) + (cur.1 - prev.1).powi(2)).sqrt();
    let d12 = ((next.0 - cur.0).powi(2) + (next.1 - cur.1).powi(2)).sqrt();
    let total = d01 + d12;
    let (s01, s12) = if total > 0.0 { (d01 / total, d12 / total) } else { (0.0, 0.0) };

    let fa = tension * s01;
    let fb = tension * s12;
    let (dx, dy) = (next.0 - prev.0, next.1 - prev.1);
    ((cur.0 - fa * dx, cur.1 - fa * dy), (cur.0 + fb * dx, cur.1 + fb * dy))
}

fn clamp_to(p: Pt, x: &Range<i32>, y: &Range<i32>) -> Pt {
    (
        p.0.clamp(x.start as f64, (x.end - 1) as f64),
        p.1.clamp(y.start as f64, (y.end - 1) as f64),
    )
}

/// Smooth a run of pixel points with Bezier segments and flatten them
///
/// Control points are kept inside the plot area. A tension of zero returns
/// the points unchanged.
pub fn smooth_run(points: &[Pt], tension: f64, x_range: &Range<i32>, y_range: &Range<i32>) -> Vec<(i32, i32)> {
    let round = |p: Pt| (p.0.round() as i32, p.1.round() as i32);
    if tension <= 0.0 || points.len() < 3 || x_range.is_empty() || y_range.is_empty() {
        return points.iter().copied().map(round).collect();
    }

    let controls: Vec<(Pt, Pt)> = (0..points.len())
        .map(|i| {
            let prev = points[i.saturating_sub(1)];
            let next = points[(i + 1).min(points.len() - 1)];
            let (a, b) = spline_curve(prev, points[i], next, tension);
            (clamp_to(a, x_range, y_range), clamp_to(b, x_range, y_range))
        })
        .collect();

    let mut out = vec![round(points[0])];
    for i in 0..points.len() - 1 {
        let (p0, p3) = (points[i], points[i + 1]);
        let (p1, p2) = (controls[i].1, controls[i + 1].0);
        for step in 1..=CURVE_STEPS {
            let t = step as f64 / CURVE_STEPS as f64;
            let u = 1.0 - t;
            let x = u * u * u * p0.0 + 3.0 * u * u * t * p1.0 + 3.0 * u * t * t * p2.0 + t * t * t * p3.0;
            let y = u * u * u * p0.1 + 3.0 * u * u * t * p1.1 + 3.0 * u * t * t * p2.1 + t * t * t * p3.1;
            let p = round((x, y));
            if out.last() != Some(&p) {
                out.push(p);
            }
        }
    }
    out
}

/// Pixel columns between a polyline and the baseline row, clipped to the plot area
pub fn fill_columns(path: &[(i32, i32)], baseline: i32, x_range: &Range<i32>, y_range: &Range<i32>) -> Vec<ColumnSpan> {
    if x_range.is_empty() || y_range.is_empty() {
        return Vec::new();
    }
    let mut line_y: BTreeMap<i32, i32> = BTreeMap::new();
    for pair in path.windows(2) {
        let (a, b) = if pair[0].0 <= pair[1].0 { (pair[0], pair[1]) } else { (pair[1], pair[0]) };
        for x in a.0..=b.0 {
            let y = if b.0 == a.0 {
                a.1.min(b.1)
            } else {
                a.1 + ((b.1 - a.1) as f64 * (x - a.0) as f64 / (b.0 - a.0) as f64).round() as i32
            };
            line_y.insert(x, y);
        }
    }

    let baseline = baseline.clamp(y_range.start, y_range.end - 1);
    line_y
        .into_iter()
        .filter(|(x, _)| x_range.contains(x))
        .map(|(x, y)| {
            let y = y.clamp(y_range.start, y_range.end - 1);
            (x, y.min(baseline), y.max(baseline))
        })
        .collect()
}

/// Strokes line runs, running the configured hooks around each stroke
#[derive(Default)]
pub struct LineRenderer {
    hooks: Vec<Box<dyn StrokeHook>>,
}

impl LineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook(mut self, hook: impl StrokeHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Renderer for a chart: glow when the options carry a shadow color
    pub fn for_options(options: &ChartOptions) -> Self {
        match GlowHook::from_options(options) {
            Some(glow) => Self::new().with_hook(glow),
            None => {
                tracing::debug!("No shadow color configured, line glow disabled");
                Self::new()
            }
        }
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    pub fn draw<DB: DrawingBackend>(
        &self,
        canvas: &mut Canvas<DB>,
        runs: &[Vec<(i32, i32)>],
        color: RGBAColor,
        width: u32,
    ) -> Result<(), ChartError> {
        for run in runs {
            canvas.save();
            {
                let state = canvas.state_mut();
                state.stroke_color = color;
                state.line_width = width;
                for hook in &self.hooks {
                    hook.apply(state);
                }
            }
            let stroked = canvas.stroke(run);
            canvas.restore();
            stroked?;
        }
        Ok(())
    }

    /// Point markers, skipped for a zero radius
    pub fn draw_points<DB: DrawingBackend>(
        &self,
        canvas: &Canvas<DB>,
        points: &[(i32, i32)],
        color: RGBAColor,
        radius: u32,
    ) -> Result<(), ChartError> {
        if radius == 0 {
            return Ok(());
        }
        for &p in points {
            canvas
                .area()
                .draw(&Circle::new(p, radius, color.filled()))
                .map_err(|e| ChartError::Render(e.to_string()))?;
        }
        Ok(())
    }
}
