use plotters::coord::Shift;
use plotters::prelude::*;
use tradesense_models::daily::MergedDay;
use tradesense_models::records::SentimentLabel;

use crate::error::RenderError;
use crate::style::ResolvedStyle;
use crate::timeseries::padded_range;

pub const TITLE: &str = "Trader PnL by Market Sentiment";

// Half widths of a box and of the whisker caps, in category units.
const BOX_HALF_WIDTH: f64 = 0.3;
const CAP_HALF_WIDTH: f64 = 0.15;
const EDGE: RGBColor = RGBColor(61, 61, 61);

/// Pass-through wrapper so the key-pointed f64 axis satisfies plotters'
/// `ValueFormatter` bound; tick labels come from `category_name`.
struct CategoryAxis(plotters::coord::combinators::WithKeyPoints<plotters::coord::types::RangedCoordf64>);

impl Ranged for CategoryAxis {
    type ValueType = f64;
    type FormatOption = plotters::coord::ranged1d::DefaultFormatting;

    fn range(&self) -> std::ops::Range<f64> {
        self.0.range()
    }

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.0.map(value, limit)
    }

    fn key_points<Hint: plotters::coord::ranged1d::KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        self.0.key_points(hint)
    }

    fn axis_pixel_range(&self, limit: (i32, i32)) -> std::ops::Range<i32> {
        self.0.axis_pixel_range(limit)
    }
}

/// Daily PnL values grouped by sentiment label, in [`SentimentLabel::ALL`]
/// order. Every label gets a bucket, possibly empty; rows whose label is not
/// one of the five are left out.
pub fn pnl_buckets(rows: &[MergedDay]) -> Vec<(&'static SentimentLabel, Vec<f64>)> {
    SentimentLabel::ALL
        .iter()
        .map(|label| {
            let values = rows
                .iter()
                .filter(|row| row.sentiment_label.parse::<SentimentLabel>().ok() == Some(*label))
                .map(|row| row.total_pnl)
                .collect();
            (label, values)
        })
        .collect()
}

/// Tukey box summary of one bucket. Whiskers end on the most extreme values
/// within 1.5 IQR of the box; anything further out is an outlier.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// Linearly interpolated quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

impl BoxStats {
    /// `None` when the bucket has no finite values.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let reach = 1.5 * (q3 - q1);
        let (low_fence, high_fence) = (q1 - reach, q3 + reach);

        let (inside, outliers): (Vec<f64>, Vec<f64>) = sorted
            .iter()
            .partition(|v| (low_fence..=high_fence).contains(*v));
        // The quartiles lie inside the fences, so `inside` is never empty.
        let lower_whisker = inside.iter().copied().fold(f64::INFINITY, f64::min);
        let upper_whisker = inside.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        })
    }
}

/// Tick label for category position `x`; positions between categories stay blank.
fn category_name(x: &f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    SentimentLabel::ALL
        .get(idx as usize)
        .map(|label| label.to_string())
        .unwrap_or_default()
}

pub fn draw_boxplot<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    rows: &[MergedDay],
    style: &ResolvedStyle,
) -> Result<(), RenderError> {
    let boxes: Vec<(f64, BoxStats)> = pnl_buckets(rows)
        .iter()
        .enumerate()
        .filter_map(|(i, (_, values))| Some((i as f64, BoxStats::from_values(values)?)))
        .collect();
    let y = padded_range(
        boxes
            .iter()
            .flat_map(|(_, b)| {
                [b.lower_whisker, b.upper_whisker]
                    .into_iter()
                    .chain(b.outliers.iter().copied())
            }),
    );

    let n = SentimentLabel::ALL.len();
    let x = CategoryAxis(
        (-0.5..n as f64 - 0.5).with_key_points((0..n).map(|i| i as f64).collect()),
    );

    let mut chart = ChartBuilder::on(area)
        .caption(TITLE, ("sans-serif", style.title_font_size))
        .margin(style.margin)
        .x_label_area_size(style.label_font_size * 4)
        .y_label_area_size(style.label_font_size * 6)
        .build_cartesian_2d(x, y)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_label_formatter(&category_name)
        .x_desc("Market Sentiment")
        .y_desc("Total PnL")
        .label_style(("sans-serif", style.label_font_size));
    if !style.grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    let edge = EDGE.stroke_width(style.line_width);

    chart.draw_series(boxes.iter().map(|(x, b)| {
        Rectangle::new(
            [(x - BOX_HALF_WIDTH, b.q1), (x + BOX_HALF_WIDTH, b.q3)],
            style.boxplot.filled(),
        )
    }))?;
    chart.draw_series(boxes.iter().map(|(x, b)| {
        Rectangle::new(
            [(x - BOX_HALF_WIDTH, b.q1), (x + BOX_HALF_WIDTH, b.q3)],
            edge,
        )
    }))?;
    chart.draw_series(boxes.iter().flat_map(|(x, b)| {
        [
            vec![(x - BOX_HALF_WIDTH, b.median), (x + BOX_HALF_WIDTH, b.median)],
            vec![(*x, b.q1), (*x, b.lower_whisker)],
            vec![(*x, b.q3), (*x, b.upper_whisker)],
            vec![(x - CAP_HALF_WIDTH, b.lower_whisker), (x + CAP_HALF_WIDTH, b.lower_whisker)],
            vec![(x - CAP_HALF_WIDTH, b.upper_whisker), (x + CAP_HALF_WIDTH, b.upper_whisker)],
        ]
        .into_iter()
        .map(move |points| PathElement::new(points, edge))
    }))?;
    chart.draw_series(boxes.iter().flat_map(|(x, b)| {
        b.outliers
            .iter()
            .map(move |v| Circle::new((*x, *v), 3, EDGE.stroke_width(1)))
    }))?;

    Ok(())
}
