//! Figure rendering for the trade performance vs. market sentiment analysis.
//!
//! A single 2x2 figure: correlation heatmap, PnL by sentiment boxplot, and two
//! time-series overlays. Everything about its look comes from an explicit
//! [`PlotStyle`](tradesense_models::config::PlotStyle).

pub mod boxplot;
pub mod error;
pub mod figure;
pub mod heatmap;
pub mod style;
pub mod timeseries;

pub use error::RenderError;
pub use figure::{draw_figure, render_svg_string, render_to_file, FigureData};
