//! Heuristic investment score over the latest indicator snapshot.
//!
//! Four threshold components: trend (0-2), momentum (0-1), risk-adjusted
//! (0-1), absolute return (0-1). Momentum uses the strict 30 <= RSI <= 70
//! band. All boundaries are exact; no rounding.

use crate::domain::indicator_set::Snapshot;
use std::fmt;

pub const MAX_SCORE: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Hold,
    Caution,
}

impl Recommendation {
    fn from_total(total: u8) -> Self {
        match total {
            4..=5 => Recommendation::StrongBuy,
            3 => Recommendation::Buy,
            2 => Recommendation::Hold,
            _ => Recommendation::Caution,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Recommendation::StrongBuy => "STRONG_BUY",
            Recommendation::Buy => "BUY",
            Recommendation::Hold => "HOLD",
            Recommendation::Caution => "CAUTION",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub trend: u8,
    pub momentum: u8,
    pub risk_adjusted: u8,
    pub absolute_return: u8,
    pub total: u8,
    pub recommendation: Recommendation,
}

pub fn score_snapshot(snapshot: &Snapshot) -> Score {
    let trend = if snapshot.sma_short > snapshot.sma_medium
        && snapshot.sma_medium > snapshot.sma_long
    {
        2
    } else if snapshot.close > snapshot.sma_short {
        1
    } else {
        0
    };

    let momentum = u8::from((30.0..=70.0).contains(&snapshot.rsi));
    let risk_adjusted = u8::from(snapshot.sharpe_ratio > 0.5);
    let absolute_return = u8::from(snapshot.annualized_return > 0.05);

    // Component bounds already cap the sum at 5; clamp anyway.
    let total = (trend + momentum + risk_adjusted + absolute_return).min(MAX_SCORE);

    Score {
        trend,
        momentum,
        risk_adjusted,
        absolute_return,
        total,
        recommendation: Recommendation::from_total(total),
    }
}
