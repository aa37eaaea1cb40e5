use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tradesense_models::daily::{DailyPerformance, DailySentiment};
use tradesense_models::records::{SentimentRecord, TradeRecord, TRADE_TIMESTAMP_FORMAT};

use crate::error::PipelineError;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %B %Y", "%B %d, %Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Calendar date of a trade timestamp in `DD-MM-YYYY HH:MM` form.
pub fn parse_trade_date(raw: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(raw.trim(), TRADE_TIMESTAMP_FORMAT)
        .ok()
        .map(|dt| dt.date())
}

/// Calendar date of a sentiment `date` cell.
///
/// Accepts ISO dates, ISO date-times, RFC 3339 and spelled-out month names.
/// Time of day and offset are dropped.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

#[derive(Debug, Default)]
struct DayTotals {
    pnl: f64,
    price_sum: f64,
    volume_usd: f64,
    fees: f64,
    trades: usize,
}

/// Group trades by calendar date: sum of PnL, mean execution price, sum of
/// USD size and sum of fees. One row per distinct date, ascending.
///
/// A single unparseable timestamp fails the whole aggregation.
pub fn daily_performance(trades: &[TradeRecord]) -> Result<Vec<DailyPerformance>, PipelineError> {
    let mut days: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();

    for (idx, trade) in trades.iter().enumerate() {
        let date = parse_trade_date(&trade.timestamp).ok_or_else(|| PipelineError::Timestamp {
            row: idx + 1,
            value: trade.timestamp.clone(),
        })?;

        let totals = days.entry(date).or_default();
        totals.pnl += trade.closed_pnl;
        totals.price_sum += trade.execution_price;
        totals.volume_usd += trade.size_usd;
        totals.fees += trade.fee;
        totals.trades += 1;
    }

    tracing::debug!(trades = trades.len(), days = days.len(), "Aggregated trades by date");

    Ok(days
        .into_iter()
        .map(|(date, totals)| DailyPerformance {
            date,
            total_pnl: totals.pnl,
            avg_price: totals.price_sum / totals.trades as f64,
            total_volume_usd: totals.volume_usd,
            total_fees: totals.fees,
        })
        .collect())
}

/// Normalize sentiment rows to `date, sentiment_score, sentiment_label`,
/// keeping file order.
pub fn daily_sentiment(rows: &[SentimentRecord]) -> Result<Vec<DailySentiment>, PipelineError> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let date = parse_calendar_date(&row.date).ok_or_else(|| PipelineError::Date {
                row: idx + 1,
                value: row.date.clone(),
            })?;
            Ok(DailySentiment {
                date,
                sentiment_score: row.value,
                sentiment_label: row.classification.clone(),
            })
        })
        .collect()
}
