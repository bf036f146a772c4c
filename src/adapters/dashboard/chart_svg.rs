//! SVG chart rendering for the per-ticker dashboard.
//!
//! Three stacked panels on one canvas: close with SMA overlays, RSI with the
//! 30/70 band guides, and drawdown from the running peak.

use crate::domain::analysis::TickerAnalysis;
use crate::domain::indicator::drawdown::drawdown_series;
use crate::domain::indicator::{IndicatorKind, IndicatorSeries};
use crate::domain::price_series::PriceSeries;

const CHART_WIDTH: f64 = 700.0;
const PANEL_HEIGHT: f64 = 220.0;
const PANEL_GAP: f64 = 20.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 40.0;

const SMA_COLORS: [&str; 3] = ["#f59e0b", "#10b981", "#8b5cf6"];

struct Panel {
    top: f64,
}

impl Panel {
    fn plot_left(&self) -> f64 {
        MARGIN_LEFT
    }

    fn plot_top(&self) -> f64 {
        self.top + MARGIN_TOP
    }

    fn plot_width(&self) -> f64 {
        CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height(&self) -> f64 {
        PANEL_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn plot_bottom(&self) -> f64 {
        self.plot_top() + self.plot_height()
    }

    fn x(&self, i: usize, count: usize) -> f64 {
        self.plot_left() + (i as f64 / (count - 1).max(1) as f64) * self.plot_width()
    }

    /// Maps `value` in [min, max] to a y pixel, top of panel = max.
    fn y(&self, value: f64, min: f64, max: f64) -> f64 {
        let range = (max - min).max(f64::MIN_POSITIVE);
        self.plot_bottom() - ((value - min) / range) * self.plot_height()
    }

    fn frame(&self, title: &str) -> String {
        let mut svg = String::new();
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"12\" fill=\"#666\">{}</text>\n",
            CHART_WIDTH - MARGIN_RIGHT,
            self.top + 15.0,
            title
        ));
        svg.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{:.1}\" x2=\"{}\" y2=\"{:.1}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
            MARGIN_LEFT,
            self.plot_top(),
            MARGIN_LEFT,
            self.plot_bottom()
        ));
        svg.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{:.1}\" x2=\"{}\" y2=\"{:.1}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
            MARGIN_LEFT,
            self.plot_bottom(),
            CHART_WIDTH - MARGIN_RIGHT,
            self.plot_bottom()
        ));
        svg
    }

    fn y_label(&self, y: f64, text: &str) -> String {
        format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"10\" fill=\"#666\">{}</text>\n",
            MARGIN_LEFT - 5.0,
            y + 3.0,
            text
        )
    }
}

fn line_path(points: &[(f64, f64)]) -> String {
    let mut data = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        if i == 0 {
            data.push_str(&format!("M {:.1} {:.1}", x, y));
        } else {
            data.push_str(&format!(" L {:.1} {:.1}", x, y));
        }
    }
    data
}

/// Full dashboard for one ticker. Empty string when the series has no bars.
pub fn render_ticker_dashboard(analysis: &TickerAnalysis) -> String {
    let prices = &analysis.prices;
    if prices.is_empty() {
        return String::new();
    }

    let total_height = 3.0 * PANEL_HEIGHT + 2.0 * PANEL_GAP;
    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<svg width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"##,
        CHART_WIDTH, total_height, CHART_WIDTH, total_height
    ));
    svg.push('\n');
    svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");

    let smas: Vec<&IndicatorSeries> = [
        sma_series(analysis, 0),
        sma_series(analysis, 1),
        sma_series(analysis, 2),
    ]
    .into_iter()
    .flatten()
    .collect();

    svg.push_str(&render_price_panel(
        Panel { top: 0.0 },
        analysis.ticker.as_str(),
        prices,
        &smas,
    ));
    if let Some(rsi) = rsi_series(analysis) {
        svg.push_str(&render_rsi_panel(
            Panel {
                top: PANEL_HEIGHT + PANEL_GAP,
            },
            rsi,
        ));
    }
    svg.push_str(&render_drawdown_panel(
        Panel {
            top: 2.0 * (PANEL_HEIGHT + PANEL_GAP),
        },
        prices,
    ));

    svg.push_str("</svg>");
    svg
}

fn sma_series(analysis: &TickerAnalysis, rank: usize) -> Option<&IndicatorSeries> {
    let mut windows: Vec<usize> = analysis
        .indicators
        .series
        .keys()
        .filter_map(|kind| match kind {
            IndicatorKind::Sma(w) => Some(*w),
            _ => None,
        })
        .collect();
    windows.sort_unstable();
    let window = windows.get(rank)?;
    analysis.indicators.series(&IndicatorKind::Sma(*window))
}

fn rsi_series(analysis: &TickerAnalysis) -> Option<&IndicatorSeries> {
    analysis
        .indicators
        .series
        .iter()
        .find(|(kind, _)| matches!(kind, IndicatorKind::Rsi(_)))
        .map(|(_, series)| series)
}

fn render_price_panel(
    panel: Panel,
    ticker: &str,
    prices: &PriceSeries,
    smas: &[&IndicatorSeries],
) -> String {
    let bars = prices.bars();
    let min_close = bars.iter().map(|b| b.close).fold(f64::INFINITY, f64::min);
    let max_close = bars
        .iter()
        .map(|b| b.close)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut svg = panel.frame(&format!("{} close", ticker));
    svg.push_str(&panel.y_label(panel.plot_top(), &format!("{:.0}", max_close)));
    svg.push_str(&panel.y_label(
        panel.plot_top() + panel.plot_height() / 2.0,
        &format!("{:.0}", (min_close + max_close) / 2.0),
    ));
    svg.push_str(&panel.y_label(panel.plot_bottom(), &format!("{:.0}", min_close)));
    svg.push_str(&render_date_labels(&panel, prices));

    let close_points: Vec<(f64, f64)> = bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            (
                panel.x(i, bars.len()),
                panel.y(b.close, min_close, max_close),
            )
        })
        .collect();
    svg.push_str(&format!(
        "  <path d=\"{}\" fill=\"none\" stroke=\"#2563eb\" stroke-width=\"2\"/>\n",
        line_path(&close_points)
    ));

    for (series, color) in smas.iter().zip(SMA_COLORS.iter()) {
        let points: Vec<(f64, f64)> = series
            .points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.valid)
            .map(|(i, p)| {
                (
                    panel.x(i, series.points.len()),
                    panel.y(p.value, min_close, max_close),
                )
            })
            .collect();
        if points.len() > 1 {
            svg.push_str(&format!(
                "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\"/>\n",
                line_path(&points),
                color
            ));
        }
    }

    svg
}

fn render_rsi_panel(panel: Panel, rsi: &IndicatorSeries) -> String {
    let mut svg = panel.frame("RSI");
    svg.push_str(&panel.y_label(panel.y(100.0, 0.0, 100.0), "100"));
    svg.push_str(&panel.y_label(panel.y(70.0, 0.0, 100.0), "70"));
    svg.push_str(&panel.y_label(panel.y(30.0, 0.0, 100.0), "30"));
    svg.push_str(&panel.y_label(panel.y(0.0, 0.0, 100.0), "0"));

    // Momentum band guides.
    for guide in [30.0, 70.0] {
        let y = panel.y(guide, 0.0, 100.0);
        svg.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{:.1}\" x2=\"{}\" y2=\"{:.1}\" stroke=\"#ddd\" stroke-width=\"1\" stroke-dasharray=\"4 3\"/>\n",
            MARGIN_LEFT,
            y,
            CHART_WIDTH - MARGIN_RIGHT,
            y
        ));
    }

    let points: Vec<(f64, f64)> = rsi
        .points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.valid)
        .map(|(i, p)| {
            (
                panel.x(i, rsi.points.len()),
                panel.y(p.value, 0.0, 100.0),
            )
        })
        .collect();
    if points.len() > 1 {
        svg.push_str(&format!(
            "  <path d=\"{}\" fill=\"none\" stroke=\"#7c3aed\" stroke-width=\"1.5\"/>\n",
            line_path(&points)
        ));
    }

    svg
}

fn render_drawdown_panel(panel: Panel, prices: &PriceSeries) -> String {
    let drawdowns = drawdown_series(prices);
    let max_dd = drawdowns.iter().cloned().fold(0.0, f64::max).max(0.01);

    let mut svg = panel.frame("Drawdown");
    svg.push_str(&panel.y_label(panel.plot_top(), "0%"));
    svg.push_str(&panel.y_label(
        panel.plot_bottom(),
        &format!("-{:.1}%", max_dd * 100.0),
    ));
    svg.push_str(&render_date_labels(&panel, prices));

    // Drawdown grows downward from the panel top.
    let y_of = |dd: f64| panel.plot_top() + (dd / max_dd) * panel.plot_height();

    let mut path = format!("M {:.1} {:.1}", panel.x(0, drawdowns.len()), y_of(0.0));
    for (i, &dd) in drawdowns.iter().enumerate().skip(1) {
        path.push_str(&format!(" L {:.1} {:.1}", panel.x(i, drawdowns.len()), y_of(dd)));
    }
    path.push_str(&format!(
        " L {:.1} {:.1} L {:.1} {:.1} Z",
        panel.x(drawdowns.len() - 1, drawdowns.len()),
        y_of(0.0),
        panel.x(0, drawdowns.len()),
        y_of(0.0)
    ));
    svg.push_str(&format!(
        "  <path d=\"{}\" fill=\"rgba(239,68,68,0.3)\" stroke=\"#dc2626\" stroke-width=\"1\"/>\n",
        path
    ));

    svg
}

fn render_date_labels(panel: &Panel, prices: &PriceSeries) -> String {
    let bars = prices.bars();
    let Some((start, end)) = prices.date_span() else {
        return String::new();
    };
    let mid = bars[bars.len() / 2].date;

    let label = |x: f64, anchor: &str, text: String| {
        format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"{}\" font-size=\"10\" fill=\"#666\">{}</text>\n",
            x,
            panel.plot_bottom() + 15.0,
            anchor,
            text
        )
    };

    let mut svg = label(MARGIN_LEFT, "start", start.to_string());
    if bars.len() > 2 {
        svg.push_str(&label(
            MARGIN_LEFT + panel.plot_width() / 2.0,
            "middle",
            mid.to_string(),
        ));
    }
    if bars.len() > 1 {
        svg.push_str(&label(CHART_WIDTH - MARGIN_RIGHT, "end", end.to_string()));
    }
    svg
}
