//! Ticker universe parsing and validation.
//!
//! Parses ticker lists from configuration and checks that each ticker has
//! enough history for the configured indicator windows before analysis runs.

use crate::domain::error::IdxlensError;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::collections::HashSet;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

pub fn parse_tickers(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if !seen.insert(ticker.clone()) {
            return Err(UniverseError::DuplicateTicker(ticker));
        }
        tickers.push(ticker);
    }

    Ok(tickers)
}

#[derive(Debug, Clone)]
pub struct SkippedTicker {
    pub ticker: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone)]
pub enum SkipReason {
    NoData,
    InsufficientBars { bars: usize, minimum: usize },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoData => write!(f, "no data"),
            SkipReason::InsufficientBars { bars, minimum } => {
                write!(f, "only {} bars, minimum {} required", bars, minimum)
            }
        }
    }
}

pub struct UniverseValidationResult {
    pub tickers: Vec<String>,
    pub skipped: Vec<SkippedTicker>,
}

/// Fetch each ticker once and keep those with at least `min_bars` of
/// history in the requested range. Tickers with no data or too little are
/// skipped with a warning; an all-skip universe is an error.
pub fn validate_universe(
    data_port: &dyn DataPort,
    tickers: Vec<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    min_bars: usize,
) -> Result<UniverseValidationResult, IdxlensError> {
    let mut valid = Vec::new();
    let mut skipped = Vec::new();

    for ticker in tickers {
        let series = match data_port.fetch_prices(&ticker, start_date, end_date) {
            Ok(series) => series,
            Err(e) => {
                eprintln!("Warning: skipping {} ({})", ticker, e);
                skipped.push(SkippedTicker {
                    ticker,
                    reason: SkipReason::NoData,
                });
                continue;
            }
        };

        if series.is_empty() {
            eprintln!("Warning: skipping {} (no data in range)", ticker);
            skipped.push(SkippedTicker {
                ticker,
                reason: SkipReason::NoData,
            });
            continue;
        }

        if series.len() < min_bars {
            eprintln!(
                "Warning: skipping {} (only {} bars, minimum {} required)",
                ticker,
                series.len(),
                min_bars
            );
            skipped.push(SkippedTicker {
                ticker,
                reason: SkipReason::InsufficientBars {
                    bars: series.len(),
                    minimum: min_bars,
                },
            });
            continue;
        }

        eprintln!("  {}: {} bars [OK]", ticker, series.len());
        valid.push(ticker);
    }

    if valid.is_empty() {
        return Err(IdxlensError::InsufficientData {
            ticker: "all".to_string(),
            bars: 0,
            minimum: min_bars,
        });
    }

    if !skipped.is_empty() {
        eprintln!(
            "Analyzing {} of {} tickers",
            valid.len(),
            valid.len() + skipped.len()
        );
    }

    Ok(UniverseValidationResult {
        tickers: valid,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tickers_basic() {
        let result = parse_tickers("BBCA,BBRI,TLKM,ASII").unwrap();
        assert_eq!(result, vec!["BBCA", "BBRI", "TLKM", "ASII"]);
    }

    #[test]
    fn parse_tickers_trims_and_uppercases() {
        let result = parse_tickers("  bbca , bbri ,tlkm  ").unwrap();
        assert_eq!(result, vec!["BBCA", "BBRI", "TLKM"]);
    }

    #[test]
    fn parse_tickers_single() {
        let result = parse_tickers("BMRI").unwrap();
        assert_eq!(result, vec!["BMRI"]);
    }

    #[test]
    fn parse_tickers_empty_token() {
        let result = parse_tickers("BBCA,,BBRI");
        assert!(matches!(result, Err(UniverseError::EmptyToken)));
    }

    #[test]
    fn parse_tickers_duplicate() {
        let result = parse_tickers("BBCA,BBRI,bbca");
        assert!(matches!(
            result,
            Err(UniverseError::DuplicateTicker(t)) if t == "BBCA"
        ));
    }
}
