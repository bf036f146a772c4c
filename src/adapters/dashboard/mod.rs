//! Dashboard report adapter implementing ReportPort.
//!
//! Writes one multi-panel SVG per analyzed ticker plus a Markdown summary,
//! named `<Subject>_<ChartType>_<StartMonth_Year>-<EndMonth_Year>`.

pub mod chart_svg;
pub mod tables;

use crate::domain::analysis::AnalysisResult;
use crate::domain::error::IdxlensError;
use crate::ports::report_port::ReportPort;
use chrono::{Datelike, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};

pub struct DashboardReportAdapter;

impl DashboardReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DashboardReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "???",
    }
}

fn span_suffix(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{}_{}-{}_{}",
        month_name(start.month()),
        start.year(),
        month_name(end.month()),
        end.year()
    )
}

pub fn dashboard_file_name(ticker: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!("{}_Dashboard_{}.svg", ticker, span_suffix(start, end))
}

pub fn summary_file_name(start: NaiveDate, end: NaiveDate) -> String {
    format!("IDX_Summary_{}.md", span_suffix(start, end))
}

impl ReportPort for DashboardReportAdapter {
    fn write(
        &self,
        result: &AnalysisResult,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, IdxlensError> {
        fs::create_dir_all(output_dir)?;

        let mut written = Vec::new();
        for analysis in &result.tickers {
            let svg = chart_svg::render_ticker_dashboard(analysis);
            if svg.is_empty() {
                continue;
            }
            let path = output_dir.join(dashboard_file_name(
                &analysis.ticker,
                result.start_date,
                result.end_date,
            ));
            fs::write(&path, svg)?;
            written.push(path);
        }

        let summary = tables::render_summary(result);
        let path = output_dir.join(summary_file_name(result.start_date, result.end_date));
        fs::write(&path, summary)?;
        written.push(path);

        Ok(written)
    }
}
