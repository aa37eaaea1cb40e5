use tradesense_models::correlation::{CorrelationMatrix, MetricColumn};
use tradesense_models::daily::MergedDay;

/// Pearson correlation coefficient of two equal-length samples.
///
/// Returns NaN when the samples are empty or either has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return f64::NAN;
    }
    let (x, y) = (&x[..n], &y[..n]);

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    // sqrt(s * s) == s exactly, so a column against itself yields 1.0.
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// Pairwise Pearson matrix over [`MetricColumn::ALL`] for the merged table.
pub fn correlation_matrix(rows: &[MergedDay]) -> CorrelationMatrix {
    let columns = MetricColumn::ALL.to_vec();
    let series: Vec<Vec<f64>> = columns
        .iter()
        .map(|col| rows.iter().map(|row| col.value(row)).collect())
        .collect();

    let n = columns.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix { columns, values }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn day(d: u32, pnl: f64, price: f64, volume: f64, fees: f64, score: f64) -> MergedDay {
        MergedDay {
            date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
            total_pnl: pnl,
            avg_price: price,
            total_volume_usd: volume,
            total_fees: fees,
            sentiment_score: score,
            sentiment_label: "Neutral".to_string(),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn perfect_positive_and_negative() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert!(approx(pearson(&x, &[2.0, 4.0, 6.0, 8.0]), 1.0));
        assert!(approx(pearson(&x, &[8.0, 6.0, 4.0, 2.0]), -1.0));
    }

    #[test]
    fn known_value() {
        // Hand-computed: sxy = 6, sxx = 10, syy = 6
        let r = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 5.0, 4.0, 5.0]);
        assert!((r - 6.0 / (10.0f64 * 6.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn zero_variance_is_nan() {
        assert!(pearson(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]).is_nan());
        assert!(pearson(&[5.0, 5.0], &[5.0, 5.0]).is_nan());
    }

    #[test]
    fn too_few_points_is_nan() {
        assert!(pearson(&[], &[]).is_nan());
        assert!(pearson(&[1.0], &[3.0]).is_nan());
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let rows = vec![
            day(1, 30.0, 150.0, 3000.0, 3.0, 40.0),
            day(2, 5.0, 50.0, 500.0, 0.5, 60.0),
            day(3, -12.0, 70.0, 900.0, 0.9, 25.0),
            day(4, 48.5, 120.0, 4100.0, 4.2, 77.0),
        ];
        let matrix = correlation_matrix(&rows);

        assert_eq!(matrix.size(), 5);
        assert!(matrix.is_symmetric());
        for i in 0..5 {
            assert_eq!(matrix.values[i][i], 1.0);
            for j in 0..5 {
                let r = matrix.values[i][j];
                assert!((-1.0..=1.0).contains(&r));
            }
        }
    }

    #[test]
    fn constant_column_propagates_nan() {
        let rows = vec![
            day(1, 30.0, 100.0, 3000.0, 3.0, 40.0),
            day(2, 5.0, 100.0, 500.0, 0.5, 60.0),
            day(3, 10.0, 100.0, 900.0, 0.9, 25.0),
        ];
        let matrix = correlation_matrix(&rows);

        assert!(matrix.is_symmetric());
        for col in MetricColumn::ALL {
            let r = matrix.get(MetricColumn::AvgPrice, *col).unwrap();
            assert!(r.is_nan(), "avg_price vs {} = {r}", col.name());
        }
        assert_eq!(
            matrix.get(MetricColumn::TotalPnl, MetricColumn::TotalPnl),
            Some(1.0)
        );
    }

    #[test]
    fn volume_and_fees_move_together() {
        let rows = vec![
            day(1, 1.0, 10.0, 1000.0, 1.0, 10.0),
            day(2, 2.0, 30.0, 2000.0, 2.0, 90.0),
            day(3, 3.0, 20.0, 4000.0, 4.0, 50.0),
        ];
        let matrix = correlation_matrix(&rows);
        let r = matrix
            .get(MetricColumn::TotalVolumeUsd, MetricColumn::TotalFees)
            .unwrap();
        assert!(approx(r, 1.0));
    }
}
