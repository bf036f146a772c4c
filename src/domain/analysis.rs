//! Analysis orchestration: one sequential pass over the ticker universe.

use crate::domain::allocation::{self, WeightError, Weights};
use crate::domain::error::IdxlensError;
use crate::domain::indicator::correlation::{beta, correlation_matrix, CorrelationMatrix};
use crate::domain::indicator_set::{IndicatorConfig, IndicatorSet};
use crate::domain::price_series::PriceSeries;
use crate::domain::score::{score_snapshot, Score};
use crate::domain::universe::SkippedTicker;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum AllocationRule {
    None,
    Equal,
    ScoreWeighted,
    Explicit(Vec<(String, f64)>),
}

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub indicators: IndicatorConfig,
    pub benchmark: Option<String>,
    pub allocation: AllocationRule,
}

impl AnalysisConfig {
    /// Bars needed before a ticker can produce a complete snapshot: the long
    /// SMA window plus one so at least one daily return exists, and never
    /// less than the RSI warmup.
    pub fn min_bars(&self) -> usize {
        (self.indicators.long_window + 1).max(self.indicators.rsi_period + 1)
    }
}

/// One ticker's full analysis output. `score` is absent when the indicator
/// snapshot is incomplete (not enough history, or an undefined statistic).
#[derive(Debug, Clone)]
pub struct TickerAnalysis {
    pub ticker: String,
    pub prices: PriceSeries,
    pub indicators: IndicatorSet,
    pub score: Option<Score>,
    pub beta: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub tickers: Vec<TickerAnalysis>,
    pub correlation: CorrelationMatrix,
    pub weights: Option<Weights>,
    pub skipped: Vec<SkippedTicker>,
}

/// Run the Loader -> Indicator Engine -> Scorer -> Allocator chain over an
/// already-validated universe. Strictly sequential; each ticker is
/// independent of the others.
pub fn analyze_universe(
    data_port: &dyn DataPort,
    tickers: &[String],
    skipped: Vec<SkippedTicker>,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, IdxlensError> {
    let benchmark_returns = match &config.benchmark {
        Some(benchmark) => {
            let series =
                data_port.fetch_prices(benchmark, config.start_date, config.end_date)?;
            let set = IndicatorSet::compute(&series, &config.indicators);
            set.returns().cloned()
        }
        None => None,
    };

    let mut analyses = Vec::with_capacity(tickers.len());
    for ticker in tickers {
        let prices = data_port.fetch_prices(ticker, config.start_date, config.end_date)?;
        let indicators = IndicatorSet::compute(&prices, &config.indicators);
        let score = indicators
            .snapshot(&prices, &config.indicators)
            .map(|snapshot| score_snapshot(&snapshot));

        let ticker_beta = match (&benchmark_returns, indicators.returns()) {
            (Some(bench), Some(own)) => beta(own, bench),
            _ => None,
        };

        analyses.push(TickerAnalysis {
            ticker: ticker.clone(),
            prices,
            indicators,
            score,
            beta: ticker_beta,
        });
    }

    let return_refs: Vec<(&str, &crate::domain::indicator::IndicatorSeries)> = analyses
        .iter()
        .filter_map(|a| a.indicators.returns().map(|r| (a.ticker.as_str(), r)))
        .collect();
    let correlation = correlation_matrix(&return_refs);

    let weights = derive_weights(&analyses, &config.allocation)
        .map_err(|e| IdxlensError::ConfigInvalid {
            section: "report".to_string(),
            key: "allocation".to_string(),
            reason: e.to_string(),
        })?;

    Ok(AnalysisResult {
        start_date: config.start_date,
        end_date: config.end_date,
        tickers: analyses,
        correlation,
        weights,
        skipped,
    })
}

/// Weights over the scored tickers only; unscored tickers never receive an
/// allocation. `None` when no rule is configured or nothing was scored.
fn derive_weights(
    analyses: &[TickerAnalysis],
    rule: &AllocationRule,
) -> Result<Option<Weights>, WeightError> {
    let scored: Vec<(String, u8)> = analyses
        .iter()
        .filter_map(|a| a.score.map(|s| (a.ticker.clone(), s.total)))
        .collect();

    match rule {
        AllocationRule::None => Ok(None),
        AllocationRule::Equal => {
            if scored.is_empty() {
                return Ok(None);
            }
            let tickers: Vec<String> = scored.into_iter().map(|(t, _)| t).collect();
            allocation::equal_weight(&tickers).map(Some)
        }
        AllocationRule::ScoreWeighted => {
            if scored.is_empty() {
                return Ok(None);
            }
            allocation::score_weighted(&scored).map(Some)
        }
        AllocationRule::Explicit(entries) => {
            Weights::from_entries(entries.clone()).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator_set::Snapshot;

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            indicators: IndicatorConfig {
                short_window: 3,
                medium_window: 5,
                long_window: 8,
                rsi_period: 3,
                risk_free_rate: 0.0,
                trading_days_per_year: 252.0,
            },
            benchmark: None,
            allocation: AllocationRule::None,
        }
    }

    #[test]
    fn min_bars_covers_long_window_plus_return() {
        assert_eq!(config().min_bars(), 9);
    }

    #[test]
    fn min_bars_covers_rsi_when_larger() {
        let mut c = config();
        c.indicators.long_window = 2;
        c.indicators.rsi_period = 14;
        assert_eq!(c.min_bars(), 15);
    }

    fn scored_analysis(ticker: &str, total: u8) -> TickerAnalysis {
        let prices = PriceSeries::new(ticker.to_string(), vec![]).unwrap();
        let indicators = IndicatorSet::compute(&prices, &config().indicators);
        let snapshot = Snapshot {
            close: 100.0,
            sma_short: 100.0,
            sma_medium: 100.0,
            sma_long: 100.0,
            rsi: 50.0,
            sharpe_ratio: 0.0,
            annualized_return: 0.0,
        };
        let mut score = score_snapshot(&snapshot);
        score.total = total;
        TickerAnalysis {
            ticker: ticker.to_string(),
            prices,
            indicators,
            score: Some(score),
            beta: None,
        }
    }

    fn unscored_analysis(ticker: &str) -> TickerAnalysis {
        let mut a = scored_analysis(ticker, 0);
        a.score = None;
        a
    }

    #[test]
    fn derive_weights_none_rule() {
        let analyses = vec![scored_analysis("BBCA", 5)];
        assert_eq!(derive_weights(&analyses, &AllocationRule::None).unwrap(), None);
    }

    #[test]
    fn derive_weights_equal_over_scored_only() {
        let analyses = vec![
            scored_analysis("BBCA", 5),
            scored_analysis("BBRI", 2),
            unscored_analysis("NEWL"),
        ];
        let weights = derive_weights(&analyses, &AllocationRule::Equal)
            .unwrap()
            .unwrap();

        assert_eq!(weights.len(), 2);
        assert!(weights.get("NEWL").is_none());
    }

    #[test]
    fn derive_weights_score_weighted() {
        let analyses = vec![scored_analysis("BBCA", 4), scored_analysis("BBRI", 1)];
        let weights = derive_weights(&analyses, &AllocationRule::ScoreWeighted)
            .unwrap()
            .unwrap();

        assert!((weights.get("BBCA").unwrap() - 0.8).abs() < 1e-12);
        assert!((weights.get("BBRI").unwrap() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn derive_weights_nothing_scored() {
        let analyses = vec![unscored_analysis("BBCA")];
        assert_eq!(
            derive_weights(&analyses, &AllocationRule::ScoreWeighted).unwrap(),
            None
        );
    }

    #[test]
    fn derive_weights_explicit_validated() {
        let analyses = vec![scored_analysis("BBCA", 5)];
        let rule = AllocationRule::Explicit(vec![("BBCA".into(), 0.7), ("BBRI".into(), 0.2)]);
        assert!(derive_weights(&analyses, &rule).is_err());
    }
}
