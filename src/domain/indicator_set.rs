//! Per-ticker indicator assembly and the scoring snapshot.

use crate::domain::indicator::drawdown::max_drawdown;
use crate::domain::indicator::returns::{annualized_return, daily_returns, sharpe_ratio, volatility};
use crate::domain::indicator::rsi::calculate_rsi;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::indicator::{IndicatorKind, IndicatorSeries};
use crate::domain::price_series::PriceSeries;
use std::collections::HashMap;

/// Windows and rates for one analysis run.
#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    pub short_window: usize,
    pub medium_window: usize,
    pub long_window: usize,
    pub rsi_period: usize,
    pub risk_free_rate: f64,
    pub trading_days_per_year: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            short_window: 20,
            medium_window: 50,
            long_window: 200,
            rsi_period: 14,
            risk_free_rate: 0.0,
            trading_days_per_year: 252.0,
        }
    }
}

/// Everything derived from one ticker's price history. Recomputed fresh each
/// run; scalar stats use `None` as the explicit undefined marker.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub ticker: String,
    pub series: HashMap<IndicatorKind, IndicatorSeries>,
    pub annualized_return: Option<f64>,
    pub volatility: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub max_drawdown: Option<f64>,
}

/// Most-recent indicator values, present only when every scoring input is
/// defined. Tickers without a complete snapshot are excluded from scoring.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot {
    pub close: f64,
    pub sma_short: f64,
    pub sma_medium: f64,
    pub sma_long: f64,
    pub rsi: f64,
    pub sharpe_ratio: f64,
    pub annualized_return: f64,
}

impl IndicatorSet {
    pub fn compute(prices: &PriceSeries, config: &IndicatorConfig) -> Self {
        let mut series = HashMap::new();

        for window in [
            config.short_window,
            config.medium_window,
            config.long_window,
        ] {
            series.insert(IndicatorKind::Sma(window), calculate_sma(prices, window));
        }
        series.insert(
            IndicatorKind::Rsi(config.rsi_period),
            calculate_rsi(prices, config.rsi_period),
        );

        let returns = daily_returns(prices);
        let return_values = returns.valid_values();
        series.insert(IndicatorKind::DailyReturn, returns);

        let annualized = annualized_return(&return_values, config.trading_days_per_year);
        let vol = volatility(&return_values, config.trading_days_per_year);
        let sharpe = match (annualized, vol) {
            (Some(a), Some(v)) => sharpe_ratio(a, v, config.risk_free_rate),
            _ => None,
        };

        Self {
            ticker: prices.ticker().to_string(),
            series,
            annualized_return: annualized,
            volatility: vol,
            sharpe_ratio: sharpe,
            max_drawdown: max_drawdown(prices),
        }
    }

    pub fn series(&self, kind: &IndicatorKind) -> Option<&IndicatorSeries> {
        self.series.get(kind)
    }

    pub fn returns(&self) -> Option<&IndicatorSeries> {
        self.series.get(&IndicatorKind::DailyReturn)
    }

    /// Latest values for the scorer. `None` as soon as any input is missing:
    /// not enough history for a window, or an undefined scalar stat.
    pub fn snapshot(&self, prices: &PriceSeries, config: &IndicatorConfig) -> Option<Snapshot> {
        let last_valid =
            |kind: IndicatorKind| -> Option<f64> { self.series.get(&kind)?.last_valid() };

        Some(Snapshot {
            close: prices.last_close()?,
            sma_short: last_valid(IndicatorKind::Sma(config.short_window))?,
            sma_medium: last_valid(IndicatorKind::Sma(config.medium_window))?,
            sma_long: last_valid(IndicatorKind::Sma(config.long_window))?,
            rsi: last_valid(IndicatorKind::Rsi(config.rsi_period))?,
            sharpe_ratio: self.sharpe_ratio?,
            annualized_return: self.annualized_return?,
        })
    }
}
