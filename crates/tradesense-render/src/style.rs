use plotters::style::RGBColor;
use tradesense_models::config::PlotStyle;

use crate::error::RenderError;

/// Parse a `#rrggbb` color.
pub fn parse_hex_color(raw: &str) -> Result<RGBColor, RenderError> {
    let invalid = || RenderError::Color(raw.to_string());
    let hex = raw.trim().strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// [`PlotStyle`] with its colors resolved.
#[derive(Debug, Clone)]
pub struct ResolvedStyle {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub title_font_size: u32,
    pub label_font_size: u32,
    pub annotation_font_size: u32,
    pub line_width: u32,
    pub grid: bool,
    pub background: RGBColor,
    pub sentiment: RGBColor,
    pub pnl: RGBColor,
    pub volume: RGBColor,
    pub boxplot: RGBColor,
}

impl ResolvedStyle {
    pub fn resolve(style: &PlotStyle) -> Result<Self, RenderError> {
        Ok(Self {
            width: style.width,
            height: style.height,
            margin: style.margin,
            title_font_size: style.title_font_size,
            label_font_size: style.label_font_size,
            annotation_font_size: style.annotation_font_size,
            line_width: style.line_width,
            grid: style.grid,
            background: parse_hex_color(&style.background)?,
            sentiment: parse_hex_color(&style.palette.sentiment)?,
            pnl: parse_hex_color(&style.palette.pnl)?,
            volume: parse_hex_color(&style.palette.volume)?,
            boxplot: parse_hex_color(&style.palette.boxplot)?,
        })
    }
}

// Endpoints and midpoint of the blue-white-red diverging scale.
const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Diverging color for a coefficient in [-1, 1], centered at zero.
/// Returns `None` for NaN.
pub fn diverging_color(value: f64) -> Option<RGBColor> {
    if value.is_nan() {
        return None;
    }
    let v = value.clamp(-1.0, 1.0);
    let (from, to, t) = if v < 0.0 {
        (NEUTRAL, COOL, -v)
    } else {
        (NEUTRAL, WARM, v)
    };
    let mix = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    Some(RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2)))
}

/// Annotation text color that stays readable on a cell of `value`.
pub fn annotation_color(value: f64) -> RGBColor {
    if value.abs() > 0.6 {
        RGBColor(255, 255, 255)
    } else {
        RGBColor(0, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("#ffa500").unwrap(), RGBColor(255, 165, 0));
        assert_eq!(parse_hex_color(" #0000FF ").unwrap(), RGBColor(0, 0, 255));
    }

    #[test]
    fn rejects_bad_hex() {
        for bad in ["ffa500", "#ffa50", "#ffa5000", "#gg0000", "#ffé00"] {
            assert!(
                matches!(parse_hex_color(bad), Err(RenderError::Color(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn default_style_resolves() {
        let style = ResolvedStyle::resolve(&PlotStyle::default()).unwrap();
        assert_eq!(style.background, RGBColor(255, 255, 255));
        assert_eq!(style.pnl, RGBColor(0, 0, 255));
        assert_eq!(style.volume, RGBColor(0, 128, 0));
    }

    #[test]
    fn bad_palette_entry_is_reported() {
        let mut style = PlotStyle::default();
        style.palette.volume = "green".to_string();
        match ResolvedStyle::resolve(&style) {
            Err(RenderError::Color(c)) => assert_eq!(c, "green"),
            other => panic!("expected color error, got {other:?}"),
        }
    }

    #[test]
    fn diverging_scale_is_centered_at_zero() {
        assert_eq!(diverging_color(0.0), Some(RGBColor(221, 221, 221)));
        assert_eq!(diverging_color(-1.0), Some(RGBColor(59, 76, 192)));
        assert_eq!(diverging_color(1.0), Some(RGBColor(180, 4, 38)));
        assert_eq!(diverging_color(2.5), diverging_color(1.0));
        assert_eq!(diverging_color(f64::NAN), None);
    }

    #[test]
    fn annotation_contrast() {
        assert_eq!(annotation_color(0.95), RGBColor(255, 255, 255));
        assert_eq!(annotation_color(-0.8), RGBColor(255, 255, 255));
        assert_eq!(annotation_color(0.1), RGBColor(0, 0, 0));
    }
}
