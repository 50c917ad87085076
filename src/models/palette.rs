//! Fixed chart palette

use plotters::style::{RGBAColor, RGBColor};

/// Opacity variants available for every palette color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opacity {
    Default,
    Half,
    Quarter,
    Zero,
}

impl Opacity {
    pub fn alpha(self) -> f64 {
        match self {
            Opacity::Default => 1.0,
            Opacity::Half => 0.5,
            Opacity::Quarter => 0.25,
            Opacity::Zero => 0.0,
        }
    }
}

/// One semantic color and its opacity variants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shades {
    pub rgb: RGBColor,
}

impl Shades {
    pub fn with(&self, opacity: Opacity) -> RGBAColor {
        let RGBColor(r, g, b) = self.rgb;
        RGBAColor(r, g, b, opacity.alpha())
    }

    pub fn default(&self) -> RGBAColor {
        self.with(Opacity::Default)
    }

    pub fn half(&self) -> RGBAColor {
        self.with(Opacity::Half)
    }

    pub fn quarter(&self) -> RGBAColor {
        self.with(Opacity::Quarter)
    }

    pub fn zero(&self) -> RGBAColor {
        self.with(Opacity::Zero)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub purple: Shades,
    pub indigo: Shades,
}

pub const PALETTE: Palette = Palette {
    purple: Shades { rgb: RGBColor(149, 76, 233) },
    indigo: Shades { rgb: RGBColor(80, 102, 120) },
};

/// Default text color for ticks, titles and the legend (#ddd)
pub const TEXT_COLOR: RGBColor = RGBColor(0xdd, 0xdd, 0xdd);

/// Default glow color (#e15bff)
pub const GLOW_COLOR: RGBColor = RGBColor(0xe1, 0x5b, 0xff);

impl Palette {
    /// Look a color up by its semantic name
    pub fn get(&self, name: &str) -> Option<Shades> {
        match name.to_lowercase().as_str() {
            "purple" => Some(self.purple),
            "indigo" => Some(self.indigo),
            _ => None,
        }
    }
}

/// Parse `#rgb` or `#rrggbb`
pub fn parse_hex_color(text: &str) -> Option<RGBColor> {
    let hex = text.trim().strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut digits = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some(RGBColor(digits.next()??, digits.next()??, digits.next()??))
        }
        6 => Some(RGBColor(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purple_variants() {
        let purple = PALETTE.get("purple").unwrap();
        assert_eq!(purple.default(), RGBAColor(149, 76, 233, 1.0));
        assert_eq!(purple.half(), RGBAColor(149, 76, 233, 0.5));
        assert_eq!(purple.quarter(), RGBAColor(149, 76, 233, 0.25));
        assert_eq!(purple.zero(), RGBAColor(149, 76, 233, 0.0));
    }

    #[test]
    fn test_unknown_color() {
        assert!(PALETTE.get("orange").is_none());
        assert_eq!(PALETTE.get("Indigo").unwrap().quarter(), RGBAColor(80, 102, 120, 0.25));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#e15bff"), Some(GLOW_COLOR));
        assert_eq!(parse_hex_color("#ddd"), Some(TEXT_COLOR));
        assert_eq!(parse_hex_color("e15bff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }
}
