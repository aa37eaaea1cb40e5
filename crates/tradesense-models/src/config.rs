use serde::{Deserialize, Serialize};

/// Top-level configuration for a tradesense run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TradesenseConfig {
    #[serde(default)]
    pub inputs: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub style: PlotStyle,
}

/// Locations of the two source CSV files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    /// Trade history export (one row per executed trade).
    #[serde(default = "default_trades_path")]
    pub trades_path: String,
    /// Daily fear & greed index export.
    #[serde(default = "default_sentiment_path")]
    pub sentiment_path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            trades_path: default_trades_path(),
            sentiment_path: default_sentiment_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Where the rendered figure is written. The extension selects the format.
    #[serde(default = "default_figure_path")]
    pub figure_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            figure_path: default_figure_path(),
        }
    }
}

/// Look of the rendered figure. Passed explicitly to the renderer so a
/// render depends only on its inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotStyle {
    /// Figure width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Figure height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Blank space around each panel, in pixels.
    #[serde(default = "default_margin")]
    pub margin: u32,
    #[serde(default = "default_title_font_size")]
    pub title_font_size: u32,
    #[serde(default = "default_label_font_size")]
    pub label_font_size: u32,
    /// Font size of the numbers printed inside heatmap cells.
    #[serde(default = "default_annotation_font_size")]
    pub annotation_font_size: u32,
    #[serde(default = "default_line_width")]
    pub line_width: u32,
    /// Draw background grid lines on the boxplot and time-series panels.
    #[serde(default = "default_true")]
    pub grid: bool,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default)]
    pub palette: Palette,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin: default_margin(),
            title_font_size: default_title_font_size(),
            label_font_size: default_label_font_size(),
            annotation_font_size: default_annotation_font_size(),
            line_width: default_line_width(),
            grid: default_true(),
            background: default_background(),
            palette: Palette::default(),
        }
    }
}

/// Series colors as `#rrggbb` strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Palette {
    #[serde(default = "default_sentiment_color")]
    pub sentiment: String,
    #[serde(default = "default_pnl_color")]
    pub pnl: String,
    #[serde(default = "default_volume_color")]
    pub volume: String,
    #[serde(default = "default_boxplot_color")]
    pub boxplot: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            sentiment: default_sentiment_color(),
            pnl: default_pnl_color(),
            volume: default_volume_color(),
            boxplot: default_boxplot_color(),
        }
    }
}

fn default_trades_path() -> String {
    "historical_data.csv".to_string()
}
fn default_sentiment_path() -> String {
    "fear_greed_index.csv".to_string()
}
fn default_figure_path() -> String {
    "sentiment_performance.svg".to_string()
}
fn default_width() -> u32 {
    1800
}
fn default_height() -> u32 {
    1200
}
fn default_margin() -> u32 {
    20
}
fn default_title_font_size() -> u32 {
    26
}
fn default_label_font_size() -> u32 {
    15
}
fn default_annotation_font_size() -> u32 {
    16
}
fn default_line_width() -> u32 {
    2
}
fn default_true() -> bool {
    true
}
fn default_background() -> String {
    "#ffffff".to_string()
}
fn default_sentiment_color() -> String {
    "#ffa500".to_string()
}
fn default_pnl_color() -> String {
    "#0000ff".to_string()
}
fn default_volume_color() -> String {
    "#008000".to_string()
}
fn default_boxplot_color() -> String {
    "#4878d0".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let toml_str = r##"
[inputs]
trades_path = "data/historical_data.csv"
sentiment_path = "data/fear_greed_index.csv"

[output]
figure_path = "out/figure.svg"

[style]
width = 1200
height = 800
margin = 10
title_font_size = 20
label_font_size = 12
annotation_font_size = 12
line_width = 3
grid = false
background = "#fafafa"

[style.palette]
sentiment = "#ff8800"
pnl = "#1f77b4"
volume = "#2ca02c"
boxplot = "#4878d0"
"##;
        let config: TradesenseConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.inputs.trades_path, "data/historical_data.csv");
        assert_eq!(config.output.figure_path, "out/figure.svg");
        assert_eq!(config.style.width, 1200);
        assert!(!config.style.grid);
        assert_eq!(config.style.palette.pnl, "#1f77b4");
    }

    #[test]
    fn deserialize_empty_config_uses_defaults() {
        let config: TradesenseConfig = toml::from_str("").unwrap();
        assert_eq!(config, TradesenseConfig::default());
        assert_eq!(config.inputs.trades_path, "historical_data.csv");
        assert_eq!(config.inputs.sentiment_path, "fear_greed_index.csv");
        assert_eq!(config.style.width, 1800);
        assert_eq!(config.style.height, 1200);
        assert_eq!(config.style.line_width, 2);
        assert!(config.style.grid);
    }

    #[test]
    fn deserialize_partial_style() {
        let toml_str = r##"
[inputs]
trades_path = "trades.csv"

[style.palette]
volume = "#00ff00"
"##;
        let config: TradesenseConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.inputs.trades_path, "trades.csv");
        assert_eq!(config.inputs.sentiment_path, "fear_greed_index.csv");
        assert_eq!(config.style.palette.volume, "#00ff00");
        assert_eq!(config.style.palette.sentiment, "#ffa500");
        assert_eq!(config.style.width, 1800);
    }

    #[test]
    fn roundtrip_config() {
        let config = TradesenseConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: TradesenseConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
