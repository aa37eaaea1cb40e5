use std::collections::HashMap;

use chrono::NaiveDate;
use tradesense_models::daily::{DailyPerformance, DailySentiment, MergedDay};

/// Inner join on calendar date. Dates missing from either side are dropped.
///
/// Output follows the order of `performance`. Every sentiment row for a date
/// produces its own merged row, so a date listed twice in the sentiment table
/// appears twice in the result.
pub fn merge_on_date(performance: &[DailyPerformance], sentiment: &[DailySentiment]) -> Vec<MergedDay> {
    let mut by_date: HashMap<NaiveDate, Vec<&DailySentiment>> = HashMap::new();
    for row in sentiment {
        by_date.entry(row.date).or_default().push(row);
    }

    for (date, rows) in &by_date {
        if rows.len() > 1 {
            tracing::warn!(%date, rows = rows.len(), "Multiple sentiment rows for one date");
        }
    }

    let merged: Vec<MergedDay> = performance
        .iter()
        .flat_map(|day| {
            by_date
                .get(&day.date)
                .into_iter()
                .flatten()
                .map(move |s| MergedDay::new(day, s))
        })
        .collect();

    tracing::debug!(
        trade_days = performance.len(),
        sentiment_days = by_date.len(),
        merged = merged.len(),
        "Joined daily performance with sentiment"
    );

    merged
}
