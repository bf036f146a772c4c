//! Date-aligned return correlation and benchmark beta.

use crate::domain::indicator::IndicatorSeries;

/// Pairwise Pearson correlation of daily-return series.
///
/// Values are NaN where the statistic is undefined: fewer than two
/// overlapping dates, or zero variance on either side. The diagonal is 1.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub tickers: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.tickers.iter().position(|t| t == a)?;
        let j = self.tickers.iter().position(|t| t == b)?;
        Some(self.values[i][j])
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

pub fn correlation_matrix(returns: &[(&str, &IndicatorSeries)]) -> CorrelationMatrix {
    let n = returns.len();
    let mut values = vec![vec![f64::NAN; n]; n];

    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let pairs = aligned_pairs(returns[i].1, returns[j].1);
            let r = pearson(&pairs);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        tickers: returns.iter().map(|(t, _)| t.to_string()).collect(),
        values,
    }
}

/// Beta of an asset against a benchmark: covariance of aligned daily returns
/// over benchmark variance. `None` with fewer than two overlapping dates or
/// a flat benchmark.
pub fn beta(asset: &IndicatorSeries, benchmark: &IndicatorSeries) -> Option<f64> {
    let pairs = aligned_pairs(asset, benchmark);
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let cov = pairs
        .iter()
        .map(|(a, b)| (a - mean_a) * (b - mean_b))
        .sum::<f64>();
    let var_b = pairs.iter().map(|(_, b)| (b - mean_b).powi(2)).sum::<f64>();

    if var_b == 0.0 {
        return None;
    }
    Some(cov / var_b)
}

/// Valid return values present in both series, matched by date. Both inputs
/// are date-ordered, so a single merge pass suffices.
fn aligned_pairs(a: &IndicatorSeries, b: &IndicatorSeries) -> Vec<(f64, f64)> {
    let mut pairs = Vec::new();
    let mut iter_a = a.points.iter().filter(|p| p.valid).peekable();
    let mut iter_b = b.points.iter().filter(|p| p.valid).peekable();

    while let (Some(pa), Some(pb)) = (iter_a.peek(), iter_b.peek()) {
        if pa.date < pb.date {
            iter_a.next();
        } else if pb.date < pa.date {
            iter_b.next();
        } else {
            pairs.push((pa.value, pb.value));
            iter_a.next();
            iter_b.next();
        }
    }

    pairs
}

fn pearson(pairs: &[(f64, f64)]) -> f64 {
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x * var_y).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::{IndicatorKind, IndicatorPoint};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn return_series(start_day: u32, values: &[f64]) -> IndicatorSeries {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &value)| IndicatorPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, start_day).unwrap()
                    + chrono::Duration::days(i as i64),
                valid: true,
                value,
            })
            .collect();
        IndicatorSeries {
            kind: IndicatorKind::DailyReturn,
            points,
        }
    }

    #[test]
    fn identical_series_correlate_at_one() {
        let a = return_series(1, &[0.01, -0.02, 0.03, 0.01]);
        let b = return_series(1, &[0.01, -0.02, 0.03, 0.01]);

        let matrix = correlation_matrix(&[("A", &a), ("B", &b)]);
        assert_relative_eq!(matrix.get("A", "B").unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn opposite_series_correlate_at_minus_one() {
        let a = return_series(1, &[0.01, -0.02, 0.03]);
        let b = return_series(1, &[-0.01, 0.02, -0.03]);

        let matrix = correlation_matrix(&[("A", &a), ("B", &b)]);
        assert_relative_eq!(matrix.get("A", "B").unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn diagonal_is_one() {
        let a = return_series(1, &[0.01, 0.02]);
        let matrix = correlation_matrix(&[("A", &a)]);
        assert_relative_eq!(matrix.get("A", "A").unwrap(), 1.0);
    }

    #[test]
    fn non_overlapping_dates_yield_nan() {
        let a = return_series(1, &[0.01, 0.02, 0.03]);
        let b = return_series(20, &[0.01, 0.02, 0.03]);

        let matrix = correlation_matrix(&[("A", &a), ("B", &b)]);
        assert!(matrix.get("A", "B").unwrap().is_nan());
    }

    #[test]
    fn zero_variance_side_yields_nan() {
        let a = return_series(1, &[0.0, 0.0, 0.0]);
        let b = return_series(1, &[0.01, -0.02, 0.03]);

        let matrix = correlation_matrix(&[("A", &a), ("B", &b)]);
        assert!(matrix.get("A", "B").unwrap().is_nan());
    }

    #[test]
    fn matrix_is_symmetric() {
        let a = return_series(1, &[0.01, -0.02, 0.03, 0.00]);
        let b = return_series(1, &[0.02, -0.01, 0.01, 0.01]);

        let matrix = correlation_matrix(&[("A", &a), ("B", &b)]);
        assert_relative_eq!(
            matrix.get("A", "B").unwrap(),
            matrix.get("B", "A").unwrap()
        );
    }

    #[test]
    fn partial_overlap_uses_common_dates_only() {
        // Overlap on days 3..=5 only.
        let a = return_series(1, &[0.01, 0.02, 0.01, -0.01, 0.02]);
        let b = return_series(3, &[0.01, -0.01, 0.02, 0.05, 0.01]);

        let matrix = correlation_matrix(&[("A", &a), ("B", &b)]);
        let r = matrix.get("A", "B").unwrap();
        assert!(r.is_finite());
        assert_relative_eq!(r, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn beta_against_itself_is_one() {
        let a = return_series(1, &[0.01, -0.02, 0.03, 0.01]);
        assert_relative_eq!(beta(&a, &a).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn beta_scales_with_amplitude() {
        let bench = return_series(1, &[0.01, -0.02, 0.03, 0.01]);
        let doubled = return_series(1, &[0.02, -0.04, 0.06, 0.02]);
        assert_relative_eq!(beta(&doubled, &bench).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn beta_flat_benchmark_is_none() {
        let a = return_series(1, &[0.01, -0.02, 0.03]);
        let flat = return_series(1, &[0.0, 0.0, 0.0]);
        assert_eq!(beta(&a, &flat), None);
    }

    #[test]
    fn beta_no_overlap_is_none() {
        let a = return_series(1, &[0.01, -0.02]);
        let b = return_series(20, &[0.01, -0.02]);
        assert_eq!(beta(&a, &b), None);
    }
}
