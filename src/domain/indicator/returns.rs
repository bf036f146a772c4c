//! Daily returns and return-derived statistics.

use crate::domain::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries};
use crate::domain::price_series::PriceSeries;

/// Simple daily returns: (close[t] - close[t-1]) / close[t-1].
///
/// The first position is invalid, as is any position whose previous close is
/// not positive (the ratio would be undefined).
pub fn daily_returns(series: &PriceSeries) -> IndicatorSeries {
    let bars = series.bars();
    let mut points = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        let (valid, value) = if i == 0 {
            (false, 0.0)
        } else {
            let prev = bars[i - 1].close;
            if prev > 0.0 {
                (true, (bar.close - prev) / prev)
            } else {
                (false, 0.0)
            }
        };

        points.push(IndicatorPoint {
            date: bar.date,
            valid,
            value,
        });
    }

    IndicatorSeries {
        kind: IndicatorKind::DailyReturn,
        points,
    }
}

/// Geometric annualization: (prod(1 + r))^(trading_days / n) - 1.
///
/// `None` when there are no returns or when compounding collapses to a
/// non-positive growth factor (a -100% day makes the geometric mean
/// undefined).
pub fn annualized_return(returns: &[f64], trading_days_per_year: f64) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }

    let growth: f64 = returns.iter().map(|r| 1.0 + r).product();
    if growth <= 0.0 {
        return None;
    }

    let n = returns.len() as f64;
    Some(growth.powf(trading_days_per_year / n) - 1.0)
}

/// Annualized volatility: sample standard deviation of daily returns scaled
/// by sqrt(trading days). `None` when fewer than two returns exist.
pub fn volatility(returns: &[f64], trading_days_per_year: f64) -> Option<f64> {
    if returns.len() < 2 {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Some(variance.sqrt() * trading_days_per_year.sqrt())
}

/// Sharpe ratio: (annualized return - risk-free rate) / volatility.
/// `None` when volatility is zero (the ratio is undefined, not infinite).
pub fn sharpe_ratio(annualized: f64, volatility: f64, risk_free_rate: f64) -> Option<f64> {
    if volatility == 0.0 {
        return None;
    }
    Some((annualized - risk_free_rate) / volatility)
}
