//! Maximum drawdown from a running peak.

use crate::domain::price_series::PriceSeries;

/// Largest fractional decline from the running close maximum:
/// max over t of (peak(t) - close(t)) / peak(t).
///
/// 0 for a monotonically non-decreasing series, `None` for an empty one.
pub fn max_drawdown(series: &PriceSeries) -> Option<f64> {
    let bars = series.bars();
    let first = bars.first()?;

    let mut peak = first.close;
    let mut max_dd = 0.0_f64;

    for bar in bars {
        if bar.close > peak {
            peak = bar.close;
        } else if peak > 0.0 {
            let dd = (peak - bar.close) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    Some(max_dd)
}

/// Drawdown at every position, aligned with the input bars. Used by the
/// dashboard's drawdown panel.
pub fn drawdown_series(series: &PriceSeries) -> Vec<f64> {
    let bars = series.bars();
    let mut drawdowns = Vec::with_capacity(bars.len());
    let mut peak = match bars.first() {
        Some(b) => b.close,
        None => return drawdowns,
    };

    for bar in bars {
        if bar.close > peak {
            peak = bar.close;
        }
        let dd = if peak > 0.0 {
            (peak - bar.close) / peak
        } else {
            0.0
        };
        drawdowns.push(dd);
    }

    drawdowns
}
