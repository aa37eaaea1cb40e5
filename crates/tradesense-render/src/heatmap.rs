use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tradesense_models::correlation::{CorrelationMatrix, MetricColumn};

use crate::error::RenderError;
use crate::style::{annotation_color, diverging_color, ResolvedStyle};

pub const TITLE: &str = "Correlation Heatmap";

/// Y axis order. The axis grows upwards, so the first metric ends up on top.
const ROWS: &[MetricColumn] = &[
    MetricColumn::SentimentScore,
    MetricColumn::TotalFees,
    MetricColumn::TotalVolumeUsd,
    MetricColumn::AvgPrice,
    MetricColumn::TotalPnl,
];

fn metric_name(v: &SegmentValue<&MetricColumn>) -> String {
    match v {
        SegmentValue::Exact(col) | SegmentValue::CenterOf(col) => col.name().to_string(),
        SegmentValue::Last => String::new(),
    }
}

/// Boundary after segment `i`: the start of the next one, or the axis end.
fn upper<T>(names: &[T], i: usize) -> SegmentValue<&T> {
    names
        .get(i + 1)
        .map(SegmentValue::Exact)
        .unwrap_or(SegmentValue::Last)
}

/// Cells to paint as `(x index, y index, coefficient)`. Pairs missing from
/// the matrix and NaN coefficients are left out.
fn heatmap_cells(matrix: &CorrelationMatrix) -> Vec<(usize, usize, f64)> {
    MetricColumn::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, col)| {
            ROWS.iter()
                .enumerate()
                .filter_map(move |(j, row)| Some((i, j, matrix.get(*row, *col)?)))
        })
        .filter(|(_, _, r)| !r.is_nan())
        .collect()
}

/// Annotated correlation heatmap. The first metric is the top row; NaN
/// cells stay blank. X tick labels are turned a quarter turn, since plotters
/// fonts only rotate in 90 degree steps.
pub fn draw_heatmap<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    matrix: &CorrelationMatrix,
    style: &ResolvedStyle,
) -> Result<(), RenderError> {
    let cols = MetricColumn::ALL;
    let n = cols.len();

    let mut chart = ChartBuilder::on(area)
        .caption(TITLE, ("sans-serif", style.title_font_size))
        .margin(style.margin)
        .x_label_area_size(style.label_font_size * 9)
        .y_label_area_size(style.label_font_size * 10)
        .build_cartesian_2d(cols.into_segmented(), ROWS.into_segmented())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&metric_name)
        .y_label_formatter(&metric_name)
        .x_label_style(
            ("sans-serif", style.label_font_size)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_label_style(("sans-serif", style.label_font_size))
        .draw()?;

    let cells = heatmap_cells(matrix);

    chart.draw_series(cells.iter().filter_map(|&(i, j, r)| {
        let color = diverging_color(r)?;
        Some(Rectangle::new(
            [
                (SegmentValue::Exact(&cols[i]), SegmentValue::Exact(&ROWS[j])),
                (upper(cols, i), upper(ROWS, j)),
            ],
            color.filled(),
        ))
    }))?;

    chart.draw_series(cells.iter().map(|&(i, j, r)| {
        Text::new(
            format!("{r:.2}"),
            (
                SegmentValue::CenterOf(&cols[i]),
                SegmentValue::CenterOf(&ROWS[j]),
            ),
            ("sans-serif", style.annotation_font_size)
                .into_font()
                .color(&annotation_color(r))
                .pos(Pos::new(HPos::Center, VPos::Center)),
        )
    }))?;

    Ok(())
}
