use serde::{Deserialize, Serialize};

use crate::daily::MergedDay;

/// Numeric columns of the merged table that enter the correlation matrix.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MetricColumn {
    TotalPnl,
    AvgPrice,
    TotalVolumeUsd,
    TotalFees,
    SentimentScore,
}

impl MetricColumn {
    /// Matrix order: row and column `i` of a [`CorrelationMatrix`] is `ALL[i]`.
    pub const ALL: &'static [MetricColumn] = &[
        MetricColumn::TotalPnl,
        MetricColumn::AvgPrice,
        MetricColumn::TotalVolumeUsd,
        MetricColumn::TotalFees,
        MetricColumn::SentimentScore,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetricColumn::TotalPnl => "total_pnl",
            MetricColumn::AvgPrice => "avg_price",
            MetricColumn::TotalVolumeUsd => "total_volume_usd",
            MetricColumn::TotalFees => "total_fees",
            MetricColumn::SentimentScore => "sentiment_score",
        }
    }

    pub fn value(&self, day: &MergedDay) -> f64 {
        match self {
            MetricColumn::TotalPnl => day.total_pnl,
            MetricColumn::AvgPrice => day.avg_price,
            MetricColumn::TotalVolumeUsd => day.total_volume_usd,
            MetricColumn::TotalFees => day.total_fees,
            MetricColumn::SentimentScore => day.sentiment_score,
        }
    }
}

/// Square matrix of pairwise Pearson coefficients.
///
/// `values[i][j]` is the coefficient between `columns[i]` and `columns[j]`.
/// Undefined coefficients (fewer than two rows, zero variance) are NaN and
/// serialize as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<MetricColumn>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, row: MetricColumn, col: MetricColumn) -> Option<f64> {
        let i = self.columns.iter().position(|c| *c == row)?;
        let j = self.columns.iter().position(|c| *c == col)?;
        Some(self.values[i][j])
    }

    /// True when every off-diagonal pair is identical, treating NaN as equal to NaN.
    pub fn is_symmetric(&self) -> bool {
        let n = self.size();
        (0..n).all(|i| {
            (0..n).all(|j| {
                let (a, b) = (self.values[i][j], self.values[j][i]);
                a == b || (a.is_nan() && b.is_nan())
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names_match_merged_schema() {
        let names: Vec<&str> = MetricColumn::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "total_pnl",
                "avg_price",
                "total_volume_usd",
                "total_fees",
                "sentiment_score"
            ]
        );
    }

    #[test]
    fn get_by_column() {
        let matrix = CorrelationMatrix {
            columns: vec![MetricColumn::TotalPnl, MetricColumn::SentimentScore],
            values: vec![vec![1.0, -0.25], vec![-0.25, 1.0]],
        };
        assert_eq!(
            matrix.get(MetricColumn::TotalPnl, MetricColumn::SentimentScore),
            Some(-0.25)
        );
        assert_eq!(matrix.get(MetricColumn::AvgPrice, MetricColumn::TotalPnl), None);
        assert!(matrix.is_symmetric());
    }

    #[test]
    fn nan_serializes_as_null() {
        let matrix = CorrelationMatrix {
            columns: vec![MetricColumn::TotalFees],
            values: vec![vec![f64::NAN]],
        };
        assert!(matrix.is_symmetric());
        let json = serde_json::to_value(&matrix).unwrap();
        assert_eq!(json["columns"][0], "total_fees");
        assert!(json["values"][0][0].is_null());
    }
}
