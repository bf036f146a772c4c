//! Portfolio weight rules derived from scores.
//!
//! Equal-weight and score-weighted allocation only; anything beyond that is
//! deliberately not offered.

use std::collections::BTreeMap;

const SUM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, thiserror::Error)]
pub enum WeightError {
    #[error("weight {weight} for {ticker} outside [0, 1]")]
    OutOfRange { ticker: String, weight: f64 },

    #[error("weights sum to {sum}, expected 1")]
    BadSum { sum: f64 },

    #[error("no tickers to allocate")]
    Empty,
}

/// Ticker -> fraction mapping. Guaranteed by construction/validation to have
/// every weight in [0, 1] and a total of 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    entries: BTreeMap<String, f64>,
}

impl Weights {
    /// Caller-supplied weights; validated before acceptance.
    pub fn from_entries(entries: Vec<(String, f64)>) -> Result<Self, WeightError> {
        if entries.is_empty() {
            return Err(WeightError::Empty);
        }

        let mut sum = 0.0;
        for (ticker, weight) in &entries {
            if !(0.0..=1.0).contains(weight) {
                return Err(WeightError::OutOfRange {
                    ticker: ticker.clone(),
                    weight: *weight,
                });
            }
            sum += weight;
        }
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(WeightError::BadSum { sum });
        }

        Ok(Self {
            entries: entries.into_iter().collect(),
        })
    }

    pub fn get(&self, ticker: &str) -> Option<f64> {
        self.entries.get(ticker).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(t, &w)| (t.as_str(), w))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 1/n for every ticker.
pub fn equal_weight(tickers: &[String]) -> Result<Weights, WeightError> {
    if tickers.is_empty() {
        return Err(WeightError::Empty);
    }

    let w = 1.0 / tickers.len() as f64;
    Ok(Weights {
        entries: tickers.iter().map(|t| (t.clone(), w)).collect(),
    })
}

/// Weight proportional to score. An all-zero universe falls back to equal
/// weight rather than dividing by zero.
pub fn score_weighted(scores: &[(String, u8)]) -> Result<Weights, WeightError> {
    if scores.is_empty() {
        return Err(WeightError::Empty);
    }

    let total: u32 = scores.iter().map(|(_, s)| u32::from(*s)).sum();
    if total == 0 {
        let tickers: Vec<String> = scores.iter().map(|(t, _)| t.clone()).collect();
        return equal_weight(&tickers);
    }

    Ok(Weights {
        entries: scores
            .iter()
            .map(|(t, s)| (t.clone(), f64::from(*s) / f64::from(total)))
            .collect(),
    })
}
