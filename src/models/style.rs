//! Series styling models

use plotters::style::RGBAColor;

/// Vertical linear gradient in canvas pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub top: f64,
    pub bottom: f64,
    /// (offset in 0..=1, color), sorted by offset
    pub stops: Vec<(f64, RGBAColor)>,
}

impl LinearGradient {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self {
            top,
            bottom,
            stops: Vec::new(),
        }
    }

    pub fn add_color_stop(&mut self, offset: f64, color: RGBAColor) {
        let offset = offset.clamp(0.0, 1.0);
        let idx = self.stops.partition_point(|(o, _)| *o <= offset);
        self.stops.insert(idx, (offset, color));
    }

    /// The same gradient moved down by `dy` rows
    pub fn offset(&self, dy: f64) -> Self {
        Self {
            top: self.top + dy,
            bottom: self.bottom + dy,
            stops: self.stops.clone(),
        }
    }

    /// Color of the pixel row `y`
    pub fn color_at(&self, y: f64) -> RGBAColor {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return RGBAColor(0, 0, 0, 0.0),
        };
        let span = self.bottom - self.top;
        let t = if span.abs() < f64::EPSILON {
            0.0
        } else {
            (y - self.top) / span
        };

        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t >= a.0 && t <= b.0 {
                let local = if b.0 > a.0 { (t - a.0) / (b.0 - a.0) } else { 0.0 };
                return lerp_color(a.1, b.1, local);
            }
        }
        last.1
    }
}

fn lerp_color(a: RGBAColor, b: RGBAColor, t: f64) -> RGBAColor {
    let channel = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    RGBAColor(
        channel(a.0, b.0),
        channel(a.1, b.1),
        channel(a.2, b.2),
        a.3 + (b.3 - a.3) * t,
    )
}

/// Colors and geometry of the single line series
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStyle {
    pub fill: LinearGradient,
    pub border_color: RGBAColor,
    pub border_width: u32,
    pub point_radius: u32,
    pub tension: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_stop() -> LinearGradient {
        let mut g = LinearGradient::new(0.0, 100.0);
        g.add_color_stop(1.0, RGBAColor(0, 0, 0, 0.0));
        g.add_color_stop(0.0, RGBAColor(200, 100, 0, 1.0));
        g
    }

    #[test]
    fn test_stops_are_sorted() {
        let g = two_stop();
        assert_eq!(g.stops[0].0, 0.0);
        assert_eq!(g.stops[1].0, 1.0);
    }

    #[test]
    fn test_color_at_interpolates() {
        let g = two_stop();
        assert_eq!(g.color_at(50.0), RGBAColor(100, 50, 0, 0.5));
    }

    #[test]
    fn test_color_at_clamps_outside_range() {
        let g = two_stop();
        assert_eq!(g.color_at(-20.0), RGBAColor(200, 100, 0, 1.0));
        assert_eq!(g.color_at(500.0), RGBAColor(0, 0, 0, 0.0));
    }

    #[test]
    fn test_offset_moves_rows() {
        let g = two_stop().offset(15.0);
        assert_eq!((g.top, g.bottom), (15.0, 115.0));
        assert_eq!(g.color_at(65.0), RGBAColor(100, 50, 0, 0.5));
        assert_eq!(g.color_at(15.0), RGBAColor(200, 100, 0, 1.0));
    }

    #[test]
    fn test_empty_gradient_is_transparent() {
        let g = LinearGradient::new(0.0, 10.0);
        assert_eq!(g.color_at(5.0).3, 0.0);
    }
}
