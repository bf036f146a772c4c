//! Markdown table rendering for the summary report.

use crate::domain::allocation::Weights;
use crate::domain::analysis::{AnalysisResult, TickerAnalysis};
use crate::domain::indicator::correlation::CorrelationMatrix;

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => "-".to_string(),
    }
}

pub fn render_score_table(tickers: &[TickerAnalysis]) -> String {
    let mut out = String::new();
    out.push_str("| Ticker | Close | Trend | Momentum | Risk-adj | Abs return | Score | Recommendation |\n");
    out.push_str("|---|---|---|---|---|---|---|---|\n");

    for analysis in tickers {
        let close = fmt_opt(analysis.prices.last_close(), 2);
        match &analysis.score {
            Some(score) => out.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
                analysis.ticker,
                close,
                score.trend,
                score.momentum,
                score.risk_adjusted,
                score.absolute_return,
                score.total,
                score.recommendation
            )),
            None => out.push_str(&format!(
                "| {} | {} | - | - | - | - | - | not scored (insufficient history) |\n",
                analysis.ticker, close
            )),
        }
    }

    out
}

pub fn render_metric_table(tickers: &[TickerAnalysis]) -> String {
    let mut out = String::new();
    out.push_str("| Ticker | Annual return | Volatility | Sharpe | Max drawdown | Beta |\n");
    out.push_str("|---|---|---|---|---|---|\n");

    for analysis in tickers {
        let set = &analysis.indicators;
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            analysis.ticker,
            fmt_pct(set.annualized_return),
            fmt_pct(set.volatility),
            fmt_opt(set.sharpe_ratio, 2),
            fmt_pct(set.max_drawdown),
            fmt_opt(analysis.beta, 2),
        ));
    }

    out
}

pub fn render_correlation_table(matrix: &CorrelationMatrix) -> String {
    if matrix.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str("| |");
    for ticker in &matrix.tickers {
        out.push_str(&format!(" {} |", ticker));
    }
    out.push('\n');
    out.push_str("|---|");
    out.push_str(&"---|".repeat(matrix.tickers.len()));
    out.push('\n');

    for (i, ticker) in matrix.tickers.iter().enumerate() {
        out.push_str(&format!("| {} |", ticker));
        for j in 0..matrix.tickers.len() {
            let value = matrix.values[i][j];
            if value.is_nan() {
                out.push_str(" - |");
            } else {
                out.push_str(&format!(" {:.2} |", value));
            }
        }
        out.push('\n');
    }

    out
}

pub fn render_weight_table(weights: &Weights) -> String {
    let mut out = String::new();
    out.push_str("| Ticker | Weight |\n|---|---|\n");
    for (ticker, weight) in weights.iter() {
        out.push_str(&format!("| {} | {:.2}% |\n", ticker, weight * 100.0));
    }
    out
}

pub fn render_summary(result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# IDX analysis {} to {}\n\n",
        result.start_date, result.end_date
    ));

    out.push_str("## Scores\n\n");
    out.push_str(&render_score_table(&result.tickers));

    out.push_str("\n## Metrics\n\n");
    out.push_str(&render_metric_table(&result.tickers));

    let correlation = render_correlation_table(&result.correlation);
    if !correlation.is_empty() {
        out.push_str("\n## Return correlation\n\n");
        out.push_str(&correlation);
    }

    if let Some(weights) = &result.weights {
        out.push_str("\n## Allocation\n\n");
        out.push_str(&render_weight_table(weights));
    }

    if !result.skipped.is_empty() {
        out.push_str("\n## Skipped\n\n");
        for skipped in &result.skipped {
            out.push_str(&format!("- {}: {}\n", skipped.ticker, skipped.reason));
        }
    }

    out
}
