#![allow(dead_code)]

use chrono::NaiveDate;
use idxlens::domain::error::IdxlensError;
use idxlens::domain::indicator_set::IndicatorConfig;
use idxlens::domain::price_series::{PriceBar, PriceSeries};
use idxlens::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_prices(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, IdxlensError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(IdxlensError::DataSource {
                reason: reason.clone(),
            });
        }

        let bars: Vec<PriceBar> = self
            .data
            .get(ticker)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date <= end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if bars.is_empty() {
            return Err(IdxlensError::NoData {
                ticker: ticker.to_string(),
            });
        }

        PriceSeries::new(ticker.to_string(), bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, IdxlensError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, IdxlensError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(IdxlensError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).and_then(|bars| {
            match (bars.first(), bars.last()) {
                (Some(first), Some(last)) => Some((first.date, last.date, bars.len())),
                _ => None,
            }
        }))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(day: &str, close: f64) -> PriceBar {
    PriceBar {
        date: NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap(),
        open: close,
        high: close * 1.01,
        low: close * 0.99,
        close,
        volume: 1_000_000,
    }
}

/// `count` consecutive daily bars starting at `start`, with close moving by
/// `step(i)` each day.
pub fn generate_bars<F>(start: NaiveDate, count: usize, first_close: f64, step: F) -> Vec<PriceBar>
where
    F: Fn(usize) -> f64,
{
    let mut close = first_close;
    (0..count)
        .map(|i| {
            if i > 0 {
                close += step(i);
            }
            PriceBar {
                date: start + chrono::Duration::days(i as i64),
                open: close,
                high: close * 1.01,
                low: close * 0.99,
                close,
                volume: 1_000_000,
            }
        })
        .collect()
}

/// Small windows so short test series can fill every indicator.
pub fn small_indicator_config() -> IndicatorConfig {
    IndicatorConfig {
        short_window: 3,
        medium_window: 5,
        long_window: 10,
        rsi_period: 3,
        risk_free_rate: 0.0,
        trading_days_per_year: 252.0,
    }
}
