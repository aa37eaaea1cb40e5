use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trading performance for one calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyPerformance {
    pub date: NaiveDate,
    pub total_pnl: f64,
    pub avg_price: f64,
    pub total_volume_usd: f64,
    pub total_fees: f64,
}

/// Sentiment index reading for one calendar date, with the columns renamed
/// to the analysis schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySentiment {
    pub date: NaiveDate,
    pub sentiment_score: f64,
    /// Classification text exactly as it appeared in the source file.
    pub sentiment_label: String,
}

/// A date present in both the trade aggregate and the sentiment table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MergedDay {
    pub date: NaiveDate,
    pub total_pnl: f64,
    pub avg_price: f64,
    pub total_volume_usd: f64,
    pub total_fees: f64,
    pub sentiment_score: f64,
    pub sentiment_label: String,
}

impl MergedDay {
    pub fn new(performance: &DailyPerformance, sentiment: &DailySentiment) -> Self {
        Self {
            date: performance.date,
            total_pnl: performance.total_pnl,
            avg_price: performance.avg_price,
            total_volume_usd: performance.total_volume_usd,
            total_fees: performance.total_fees,
            sentiment_score: sentiment.sentiment_score,
            sentiment_label: sentiment.sentiment_label.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_day_carries_both_sides() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let perf = DailyPerformance {
            date,
            total_pnl: 30.0,
            avg_price: 150.0,
            total_volume_usd: 3000.0,
            total_fees: 3.0,
        };
        let sentiment = DailySentiment {
            date,
            sentiment_score: 40.0,
            sentiment_label: "Fear".to_string(),
        };

        let merged = MergedDay::new(&perf, &sentiment);
        assert_eq!(merged.date, date);
        assert_eq!(merged.total_pnl, 30.0);
        assert_eq!(merged.total_fees, 3.0);
        assert_eq!(merged.sentiment_score, 40.0);
        assert_eq!(merged.sentiment_label, "Fear");
    }

    #[test]
    fn dates_serialize_as_iso() {
        let perf = DailyPerformance {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            total_pnl: 5.0,
            avg_price: 50.0,
            total_volume_usd: 500.0,
            total_fees: 0.5,
        };
        let json = serde_json::to_value(&perf).unwrap();
        assert_eq!(json["date"], "2024-01-02");
        assert_eq!(json["total_fees"], 0.5);
    }
}
