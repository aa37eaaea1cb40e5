//! tradesense - trade performance vs. market sentiment
//!
//! Aggregates a trade history export by calendar date, joins it against a
//! daily fear & greed index, correlates the daily metrics and renders a
//! four-panel summary figure.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use tradesense::models::TradesenseConfig;
//!
//! let config = TradesenseConfig::default();
//! let analysis = tradesense::run(&config)?;
//! println!("{} overlapping days", analysis.merged.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub use tradesense_models as models;
pub use tradesense_pipeline as pipeline;
pub use tradesense_render as render;

use std::path::Path;

use anyhow::Context;
use tradesense_models::config::TradesenseConfig;
use tradesense_pipeline::Analysis;
use tradesense_render::FigureData;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/tradesense.toml";

/// Read a TOML configuration file.
///
/// When `required` is false a missing file yields the built-in defaults.
pub fn load_config(path: &Path, required: bool) -> Result<TradesenseConfig, anyhow::Error> {
    if !required && !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(TradesenseConfig::default());
    }
    let config_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: TradesenseConfig =
        toml::from_str(&config_str).with_context(|| "Failed to parse config")?;
    Ok(config)
}

/// Run the whole pipeline and write the figure to the configured path.
pub fn run(config: &TradesenseConfig) -> Result<Analysis, anyhow::Error> {
    let analysis =
        tradesense_pipeline::run_pipeline(&config.inputs).context("Failed to analyze inputs")?;

    let figure_path = Path::new(&config.output.figure_path);
    tradesense_render::render_to_file(
        FigureData {
            merged: &analysis.merged,
            correlation: &analysis.correlation,
        },
        &config.style,
        figure_path,
    )
    .with_context(|| format!("Failed to render figure: {}", figure_path.display()))?;

    Ok(analysis)
}
