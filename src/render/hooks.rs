//! Per-chart hooks run around every stroke of the line series

use plotters::style::RGBColor;

use super::canvas::{DrawState, Shadow};
use crate::models::ChartOptions;

/// Blur radius of the line glow in pixels
pub const GLOW_BLUR: u32 = 20;

/// Runs after the canvas state is saved and before a line stroke; the
/// state is restored right after the stroke.
pub trait StrokeHook {
    fn apply(&self, state: &mut DrawState);
}

/// Shadow around the line stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowHook {
    pub color: RGBColor,
    pub blur: u32,
    pub offset: (i32, i32),
}

impl GlowHook {
    pub fn new(color: RGBColor) -> Self {
        Self {
            color,
            blur: GLOW_BLUR,
            offset: (0, 0),
        }
    }

    /// Glow for the chart's shadow color, `None` when no color is set
    pub fn from_options(options: &ChartOptions) -> Option<Self> {
        options.shadow_color.map(GlowHook::new)
    }
}

impl StrokeHook for GlowHook {
    fn apply(&self, state: &mut DrawState) {
        state.shadow = Some(Shadow {
            color: self.color,
            blur: self.blur,
            offset: self.offset,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glow_sets_shadow() {
        let mut state = DrawState::default();
        GlowHook::new(RGBColor(0xe1, 0x5b, 0xff)).apply(&mut state);
        assert_eq!(
            state.shadow,
            Some(Shadow {
                color: RGBColor(0xe1, 0x5b, 0xff),
                blur: 20,
                offset: (0, 0),
            })
        );
    }
}
