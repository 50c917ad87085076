use crate::models::{LinearGradient, Palette, SeriesStyle};

/// Canvas pixel row where the fill gradient starts
pub const GRADIENT_TOP: f64 = 25.0;
/// Canvas pixel row where the fill gradient becomes fully transparent
pub const GRADIENT_BOTTOM: f64 = 300.0;

const LINE_WIDTH: u32 = 2;
const LINE_TENSION: f64 = 0.1;

/// Build the three-stop vertical fill gradient from the palette's purple
pub fn build_gradient(palette: &Palette, top: f64, bottom: f64) -> LinearGradient {
    let mut gradient = LinearGradient::new(top, bottom);
    gradient.add_color_stop(0.0, palette.purple.half());
    gradient.add_color_stop(0.35, palette.purple.quarter());
    gradient.add_color_stop(1.0, palette.purple.zero());
    gradient
}

/// Build the line series style: gradient fill plus solid purple stroke
pub fn build_style(palette: &Palette) -> SeriesStyle {
    SeriesStyle {
        fill: build_gradient(palette, GRADIENT_TOP, GRADIENT_BOTTOM),
        border_color: palette.purple.default(),
        border_width: LINE_WIDTH,
        point_radius: 0,
        tension: LINE_TENSION,
    }
}
