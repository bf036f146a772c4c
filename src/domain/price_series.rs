//! Daily price bar and per-ticker series representation.

use crate::domain::error::IdxlensError;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Ordered daily price history for one ticker.
///
/// Invariant: bar dates are strictly increasing (no duplicates). Enforced at
/// construction; the series is immutable afterwards.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(ticker: String, bars: Vec<PriceBar>) -> Result<Self, IdxlensError> {
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                let reason = if pair[1].date == pair[0].date {
                    format!("duplicate date {}", pair[1].date)
                } else {
                    format!("dates out of order at {}", pair[1].date)
                };
                return Err(IdxlensError::MalformedSeries { ticker, reason });
            }
        }
        Ok(Self { ticker, bars })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    /// First and last bar dates, when the series is non-empty.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.bars.first(), self.bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }
}
