use std::ops::Range;

use chrono::{Duration, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use tradesense_models::daily::MergedDay;

use crate::error::RenderError;
use crate::style::ResolvedStyle;

pub const SENTIMENT_PNL_TITLE: &str = "Sentiment Score vs Trader PnL Over Time";
pub const VOLUME_SENTIMENT_TITLE: &str = "Trading Volume vs Sentiment Score Over Time";

/// One line of a time-series panel.
pub struct Series<'a> {
    pub label: &'a str,
    pub color: RGBColor,
    pub value: fn(&MergedDay) -> f64,
}

/// Value range covering every finite value with 5% headroom on both sides.
/// Falls back to `0..1` when there is nothing to show, and widens a single
/// value to `v-1..v+1`.
pub fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return 0.0..1.0;
    }
    if min == max {
        return min - 1.0..max + 1.0;
    }
    let pad = (max - min) * 0.05;
    min - pad..max + pad
}

/// X axis position of `date`: whole days since `origin`.
pub fn day_offset(origin: NaiveDate, date: NaiveDate) -> f64 {
    (date - origin).num_days() as f64
}

/// Two (or more) series drawn against date on a shared value axis.
pub fn draw_timeseries<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    rows: &[MergedDay],
    series: &[Series<'_>],
    style: &ResolvedStyle,
) -> Result<(), RenderError> {
    let mut points: Vec<&MergedDay> = rows.iter().collect();
    points.sort_by_key(|row| row.date);

    let origin = points.first().map(|row| row.date).unwrap_or_default();
    let span = points
        .last()
        .map(|row| day_offset(origin, row.date))
        .unwrap_or(0.0)
        .max(1.0);
    let y = padded_range(
        series
            .iter()
            .flat_map(|s| points.iter().map(move |row| (s.value)(row))),
    );

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", style.title_font_size))
        .margin(style.margin)
        .x_label_area_size(style.label_font_size * 4)
        .y_label_area_size(style.label_font_size * 6)
        .build_cartesian_2d(0.0..span, y)?;

    let date_label = |x: &f64| {
        (origin + Duration::days(x.round() as i64))
            .format("%Y-%m-%d")
            .to_string()
    };

    let mut mesh = chart.configure_mesh();
    mesh.x_labels(6)
        .x_label_formatter(&date_label)
        .x_desc("Date")
        .y_desc("Value")
        .label_style(("sans-serif", style.label_font_size));
    if !style.grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    for s in series {
        let (color, width) = (s.color, style.line_width);
        chart
            .draw_series(LineSeries::new(
                points
                    .iter()
                    .map(|row| (day_offset(origin, row.date), (s.value)(row))),
                color.stroke_width(width),
            ))?
            .label(s.label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width))
            });
    }

    chart
        .configure_series_labels()
        .label_font(("sans-serif", style.label_font_size))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_adds_headroom() {
        let r = padded_range(vec![0.0, 100.0]);
        assert_eq!(r, -5.0..105.0);
    }

    #[test]
    fn padded_range_ignores_nan() {
        let r = padded_range(vec![f64::NAN, 10.0, 30.0]);
        assert_eq!(r, 9.0..31.0);
    }

    #[test]
    fn padded_range_degenerate_inputs() {
        assert_eq!(padded_range(Vec::new()), 0.0..1.0);
        assert_eq!(padded_range(vec![f64::NAN]), 0.0..1.0);
        assert_eq!(padded_range(vec![7.0, 7.0]), 6.0..8.0);
    }

    #[test]
    fn day_offsets_are_whole_days() {
        let origin = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();
        let later = NaiveDate::from_ymd_opt(2024, 2, 2).unwrap();
        assert_eq!(day_offset(origin, origin), 0.0);
        assert_eq!(day_offset(origin, later), 3.0);
    }
}
