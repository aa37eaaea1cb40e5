use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format of the `Timestamp IST` column in the trade history export.
pub const TRADE_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

/// One executed trade, as it appears in the trade history CSV.
///
/// Only the columns the analysis needs are declared; any other columns in the
/// export are ignored by the reader. The timestamp is kept verbatim and parsed
/// during aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeRecord {
    #[serde(rename = "Timestamp IST")]
    pub timestamp: String,
    #[serde(rename = "Execution Price")]
    pub execution_price: f64,
    #[serde(rename = "Size USD")]
    pub size_usd: f64,
    /// Realized PnL for the trade. Negative for losses.
    #[serde(rename = "Closed PnL")]
    pub closed_pnl: f64,
    #[serde(rename = "Fee")]
    pub fee: f64,
}

/// One row of the daily fear & greed index CSV.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentRecord {
    pub date: String,
    /// Index value, conventionally 0-100. Integer in most exports.
    pub value: f64,
    pub classification: String,
}

/// Market mood classification, in display order from most fearful to most greedy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SentimentLabel {
    #[serde(rename = "Extreme Fear")]
    ExtremeFear,
    #[serde(rename = "Fear")]
    Fear,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Greed")]
    Greed,
    #[serde(rename = "Extreme Greed")]
    ExtremeGreed,
}

impl SentimentLabel {
    /// Every label, in the fixed order used for bucketing and display.
    pub const ALL: &'static [SentimentLabel] = &[
        SentimentLabel::ExtremeFear,
        SentimentLabel::Fear,
        SentimentLabel::Neutral,
        SentimentLabel::Greed,
        SentimentLabel::ExtremeGreed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::ExtremeFear => "Extreme Fear",
            SentimentLabel::Fear => "Fear",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Greed => "Greed",
            SentimentLabel::ExtremeGreed => "Extreme Greed",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a classification string is not one of the five labels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sentiment label: {0:?}")]
pub struct UnknownLabel(pub String);

impl FromStr for SentimentLabel {
    type Err = UnknownLabel;

    /// Exact match against the display names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SentimentLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_ordered_fear_to_greed() {
        let names: Vec<&str> = SentimentLabel::ALL.iter().map(|l| l.as_str()).collect();
        assert_eq!(
            names,
            vec!["Extreme Fear", "Fear", "Neutral", "Greed", "Extreme Greed"]
        );
        assert!(SentimentLabel::ExtremeFear < SentimentLabel::ExtremeGreed);
    }

    #[test]
    fn parse_label_exact_match() {
        assert_eq!(
            "Extreme Greed".parse::<SentimentLabel>(),
            Ok(SentimentLabel::ExtremeGreed)
        );
        assert_eq!("Fear".parse::<SentimentLabel>(), Ok(SentimentLabel::Fear));
        assert!("fear".parse::<SentimentLabel>().is_err());
        assert!("Panic".parse::<SentimentLabel>().is_err());
    }

    #[test]
    fn unknown_label_error_quotes_the_input() {
        let err = "Panic".parse::<SentimentLabel>().unwrap_err();
        assert_eq!(err, UnknownLabel("Panic".to_string()));
        assert_eq!(err.to_string(), "unknown sentiment label: \"Panic\"");
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn label_serialization_uses_display_names() {
        assert_eq!(
            serde_json::to_string(&SentimentLabel::ExtremeFear).unwrap(),
            "\"Extreme Fear\""
        );
        let parsed: SentimentLabel = serde_json::from_str("\"Neutral\"").unwrap();
        assert_eq!(parsed, SentimentLabel::Neutral);
    }

    #[test]
    fn display_matches_as_str() {
        for label in SentimentLabel::ALL {
            assert_eq!(label.to_string(), label.as_str());
        }
    }
}
