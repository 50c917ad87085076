//! A small 2D-context style wrapper around a plotters drawing area

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::RGBAColor;

use crate::models::LinearGradient;
use crate::utils::ChartError;

/// Shadow applied to strokes while set on the draw state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: RGBColor,
    pub blur: u32,
    pub offset: (i32, i32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub stroke_color: RGBAColor,
    pub line_width: u32,
    pub shadow: Option<Shadow>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            stroke_color: RGBAColor(0, 0, 0, 1.0),
            line_width: 1,
            shadow: None,
        }
    }
}

/// Vertical span `top..=bottom` of pixel column `x`
pub type ColumnSpan = (i32, i32, i32);

/// Drawing surface with a save/restore state stack
///
/// Coordinates are backend pixels; the wrapped area must be the root area.
pub struct Canvas<'a, DB: DrawingBackend> {
    area: &'a DrawingArea<DB, Shift>,
    state: DrawState,
    saved: Vec<DrawState>,
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

impl<'a, DB: DrawingBackend> Canvas<'a, DB> {
    pub fn new(area: &'a DrawingArea<DB, Shift>) -> Self {
        Self {
            area,
            state: DrawState::default(),
            saved: Vec::new(),
        }
    }

    pub fn area(&self) -> &'a DrawingArea<DB, Shift> {
        self.area
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DrawState {
        &mut self.state
    }

    pub fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    /// Pop the last saved state; unbalanced calls are ignored
    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    /// Stroke a polyline with the current state, shadow first when one is set
    pub fn stroke(&self, path: &[(i32, i32)]) -> Result<(), ChartError> {
        if path.len() < 2 {
            return Ok(());
        }
        if let Some(shadow) = self.state.shadow {
            self.stroke_shadow(path, &shadow)?;
        }

        let style = ShapeStyle {
            color: self.state.stroke_color,
            filled: false,
            stroke_width: self.state.line_width,
        };
        self.area
            .draw(&PathElement::new(path.to_vec(), style))
            .map_err(render_err)
    }

    /// Blur is approximated by stacking wider, faint strokes under the line
    fn stroke_shadow(&self, path: &[(i32, i32)], shadow: &Shadow) -> Result<(), ChartError> {
        let layers = (shadow.blur / 2).max(1);
        let alpha = (1.0 / layers as f64).clamp(0.02, 0.08) * self.state.stroke_color.3;
        let RGBColor(r, g, b) = shadow.color;
        let shifted: Vec<(i32, i32)> = path
            .iter()
            .map(|(x, y)| (x + shadow.offset.0, y + shadow.offset.1))
            .collect();

        for k in (1..=layers).rev() {
            let style = ShapeStyle {
                color: RGBAColor(r, g, b, alpha),
                filled: false,
                stroke_width: self.state.line_width + 2 * k,
            };
            self.area
                .draw(&PathElement::new(shifted.clone(), style))
                .map_err(render_err)?;
        }
        Ok(())
    }

    /// Fill pixel columns row by row with the gradient color of each row
    ///
    /// Columns must be sorted by x. Adjacent columns covering the same row are
    /// merged into one rectangle.
    pub fn fill_columns(&self, columns: &[ColumnSpan], gradient: &LinearGradient) -> Result<(), ChartError> {
        let (Some(top), Some(bottom)) = (
            columns.iter().map(|c| c.1).min(),
            columns.iter().map(|c| c.2).max(),
        ) else {
            return Ok(());
        };

        for y in top..=bottom {
            let color = gradient.color_at(y as f64);
            if color.3 <= 0.0 {
                continue;
            }
            let mut run: Option<(i32, i32)> = None;
            for &(x, col_top, col_bottom) in columns {
                let covers = y >= col_top && y <= col_bottom;
                run = match (run, covers) {
                    (Some((start, end)), true) if x == end + 1 => Some((start, x)),
                    (Some((start, end)), _) => {
                        self.fill_row(start, end, y, color)?;
                        covers.then_some((x, x))
                    }
                    (None, true) => Some((x, x)),
                    (None, false) => None,
                };
            }
            if let Some((start, end)) = run {
                self.fill_row(start, end, y, color)?;
            }
        }
        Ok(())
    }

    fn fill_row(&self, start: i32, end: i32, y: i32, color: RGBAColor) -> Result<(), ChartError> {
        self.area
            .draw(&Rectangle::new([(start, y), (end, y)], color.filled()))
            .map_err(render_err)
    }
}
