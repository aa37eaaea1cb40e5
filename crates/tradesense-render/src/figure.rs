use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tradesense_models::config::PlotStyle;
use tradesense_models::correlation::CorrelationMatrix;
use tradesense_models::daily::MergedDay;

use crate::boxplot::draw_boxplot;
use crate::error::RenderError;
use crate::heatmap::draw_heatmap;
use crate::style::ResolvedStyle;
use crate::timeseries::{draw_timeseries, Series, SENTIMENT_PNL_TITLE, VOLUME_SENTIMENT_TITLE};

/// The data a figure is drawn from.
#[derive(Debug, Clone, Copy)]
pub struct FigureData<'a> {
    pub merged: &'a [MergedDay],
    pub correlation: &'a CorrelationMatrix,
}

/// Draw the 2x2 grid: heatmap and boxplot on top, the two time series below.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: FigureData<'_>,
    style: &ResolvedStyle,
) -> Result<(), RenderError> {
    root.fill(&style.background)?;

    let panels = root.split_evenly((2, 2));

    draw_heatmap(&panels[0], data.correlation, style)?;
    draw_boxplot(&panels[1], data.merged, style)?;
    draw_timeseries(
        &panels[2],
        SENTIMENT_PNL_TITLE,
        data.merged,
        &[
            Series {
                label: "Sentiment Score",
                color: style.sentiment,
                value: |row| row.sentiment_score,
            },
            Series {
                label: "Total PnL",
                color: style.pnl,
                value: |row| row.total_pnl,
            },
        ],
        style,
    )?;
    draw_timeseries(
        &panels[3],
        VOLUME_SENTIMENT_TITLE,
        data.merged,
        &[
            Series {
                label: "Total Volume (USD)",
                color: style.volume,
                value: |row| row.total_volume_usd,
            },
            Series {
                label: "Sentiment Score",
                color: style.sentiment,
                value: |row| row.sentiment_score,
            },
        ],
        style,
    )?;

    Ok(())
}

/// Render the figure as an SVG document in memory.
pub fn render_svg_string(data: FigureData<'_>, style: &PlotStyle) -> Result<String, RenderError> {
    let resolved = ResolvedStyle::resolve(style)?;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (resolved.width, resolved.height))
            .into_drawing_area();
        draw_figure(&root, data, &resolved)?;
        root.present()?;
    }
    Ok(svg)
}

/// Render the figure to `path`. The extension must be `.svg`; missing
/// parent directories are created.
pub fn render_to_file(
    data: FigureData<'_>,
    style: &PlotStyle,
    path: &Path,
) -> Result<(), RenderError> {
    let is_svg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if !is_svg {
        return Err(RenderError::Format(path.display().to_string()));
    }

    let resolved = ResolvedStyle::resolve(style)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let root = SVGBackend::new(path, (resolved.width, resolved.height)).into_drawing_area();
    draw_figure(&root, data, &resolved)?;
    root.present()?;

    tracing::info!(
        path = %path.display(),
        days = data.merged.len(),
        "Rendered figure"
    );
    Ok(())
}
