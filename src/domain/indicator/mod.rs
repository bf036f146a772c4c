//! Technical indicator implementations.
//!
//! Every indicator is a pure function from a [`PriceSeries`](crate::domain::price_series::PriceSeries)
//! to an [`IndicatorSeries`] aligned with the input bars. Positions with fewer
//! observations than the window are marked invalid rather than given a value.

pub mod sma;
pub mod rsi;
pub mod returns;
pub mod drawdown;
pub mod correlation;

use chrono::NaiveDate;
use std::fmt;

/// One point in an indicator time series. `value` is meaningless when
/// `valid` is false.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

/// Indicator identity plus parameters. Serves as the lookup key in an
/// indicator set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    Sma(usize),
    Rsi(usize),
    DailyReturn,
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub kind: IndicatorKind,
    pub points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Most recent valid value, if any point is valid.
    pub fn last_valid(&self) -> Option<f64> {
        self.points.iter().rev().find(|p| p.valid).map(|p| p.value)
    }

    pub fn valid_values(&self) -> Vec<f64> {
        self.points
            .iter()
            .filter(|p| p.valid)
            .map(|p| p.value)
            .collect()
    }

    pub fn valid_count(&self) -> usize {
        self.points.iter().filter(|p| p.valid).count()
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::Sma(window) => write!(f, "MA_{}", window),
            IndicatorKind::Rsi(period) => write!(f, "RSI_{}", period),
            IndicatorKind::DailyReturn => write!(f, "DAILY_RETURN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(day: u32, valid: bool, value: f64) -> IndicatorPoint {
        IndicatorPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            valid,
            value,
        }
    }

    #[test]
    fn kind_display() {
        assert_eq!(IndicatorKind::Sma(20).to_string(), "MA_20");
        assert_eq!(IndicatorKind::Rsi(14).to_string(), "RSI_14");
        assert_eq!(IndicatorKind::DailyReturn.to_string(), "DAILY_RETURN");
    }

    #[test]
    fn kind_hash_eq() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(IndicatorKind::Sma(20), "short");
        map.insert(IndicatorKind::Sma(50), "medium");
        map.insert(IndicatorKind::Rsi(14), "rsi");

        assert_eq!(map.get(&IndicatorKind::Sma(20)), Some(&"short"));
        assert_eq!(map.get(&IndicatorKind::Sma(50)), Some(&"medium"));
        assert_eq!(map.get(&IndicatorKind::Rsi(14)), Some(&"rsi"));
        assert_eq!(map.get(&IndicatorKind::Sma(200)), None);
    }

    #[test]
    fn last_valid_skips_trailing_invalid() {
        let series = IndicatorSeries {
            kind: IndicatorKind::Sma(2),
            points: vec![point(1, false, 0.0), point(2, true, 7.5), point(3, false, 0.0)],
        };
        assert_eq!(series.last_valid(), Some(7.5));
    }

    #[test]
    fn last_valid_none_when_all_invalid() {
        let series = IndicatorSeries {
            kind: IndicatorKind::Rsi(14),
            points: vec![point(1, false, 0.0), point(2, false, 0.0)],
        };
        assert_eq!(series.last_valid(), None);
    }

    #[test]
    fn valid_values_filters_and_preserves_order() {
        let series = IndicatorSeries {
            kind: IndicatorKind::DailyReturn,
            points: vec![point(1, false, 0.0), point(2, true, 0.1), point(3, true, -0.2)],
        };
        assert_eq!(series.valid_values(), vec![0.1, -0.2]);
        assert_eq!(series.valid_count(), 2);
    }
}
