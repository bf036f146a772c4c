//! RSI (Relative Strength Index) over rolling-mean gains and losses.
//!
//! Per-step close deltas are split into gains and loss magnitudes; each side
//! is averaged over a trailing `period`-length window (simple rolling mean).
//! RS = mean_gain / mean_loss, RSI = 100 - 100 / (1 + RS).
//! If mean_loss == 0: RSI = 100.
//! Warmup: the first `period` positions are invalid (a delta needs a prior
//! close, and the window needs `period` deltas).

use crate::domain::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries};
use crate::domain::price_series::PriceSeries;

pub fn calculate_rsi(series: &PriceSeries, period: usize) -> IndicatorSeries {
    let bars = series.bars();

    if period == 0 || bars.len() < period + 1 {
        let points = bars
            .iter()
            .map(|b| IndicatorPoint {
                date: b.date,
                valid: false,
                value: 0.0,
            })
            .collect();
        return IndicatorSeries {
            kind: IndicatorKind::Rsi(period),
            points,
        };
    }

    // gains[j] / losses[j] correspond to the move into bar j+1
    let mut gains = Vec::with_capacity(bars.len() - 1);
    let mut losses = Vec::with_capacity(bars.len() - 1);
    for pair in bars.windows(2) {
        let change = pair[1].close - pair[0].close;
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let mut points = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        if i < period {
            points.push(IndicatorPoint {
                date: bar.date,
                valid: false,
                value: 0.0,
            });
            continue;
        }

        let window = (i - period)..i;
        let mean_gain = gains[window.clone()].iter().sum::<f64>() / period as f64;
        let mean_loss = losses[window].iter().sum::<f64>() / period as f64;

        let rsi = if mean_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + mean_gain / mean_loss)
        };

        points.push(IndicatorPoint {
            date: bar.date,
            valid: true,
            value: rsi,
        });
    }

    IndicatorSeries {
        kind: IndicatorKind::Rsi(period),
        points,
    }
}
