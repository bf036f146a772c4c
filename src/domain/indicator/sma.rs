//! Simple moving average over closing prices.
//!
//! SMA(n)[i] = mean(close[i-n+1..=i]).
//! Warmup: first (n-1) positions are invalid. A window of 1 reproduces the
//! close series.

use crate::domain::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries};
use crate::domain::price_series::PriceSeries;

pub fn calculate_sma(series: &PriceSeries, window: usize) -> IndicatorSeries {
    let bars = series.bars();
    let mut points = Vec::with_capacity(bars.len());

    let mut window_sum = 0.0_f64;
    for (i, bar) in bars.iter().enumerate() {
        window_sum += bar.close;
        if window > 0 && i >= window {
            window_sum -= bars[i - window].close;
        }

        let valid = window > 0 && i + 1 >= window;
        let value = if valid {
            window_sum / window as f64
        } else {
            0.0
        };

        points.push(IndicatorPoint {
            date: bar.date,
            valid,
            value,
        });
    }

    IndicatorSeries {
        kind: IndicatorKind::Sma(window),
        points,
    }
}
