//! CSV file data adapter.
//!
//! One file per ticker (`<TICKER>.csv`) under a base directory, with a
//! `date,open,high,low,close,volume` header. This stands in for the
//! market-data service the documentation describes; exports from it are
//! dropped into the data directory.

use crate::domain::error::IdxlensError;
use crate::domain::price_series::{PriceBar, PriceSeries};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use csv::StringRecord;
use std::fs;
use std::path::PathBuf;

pub struct CsvDataAdapter {
    base_dir: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, IdxlensError> {
        match config.get_string("data", "csv_dir") {
            Some(dir) => Ok(Self::new(PathBuf::from(dir))),
            None => Err(IdxlensError::ConfigMissing {
                section: "data".to_string(),
                key: "csv_dir".to_string(),
            }),
        }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_dir.join(format!("{}.csv", ticker))
    }

    fn read_bars(&self, ticker: &str) -> Result<Vec<PriceBar>, IdxlensError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| IdxlensError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| IdxlensError::DataSource {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;
            bars.push(parse_bar(&record)?);
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

fn parse_bar(record: &StringRecord) -> Result<PriceBar, IdxlensError> {
    let field = |index: usize, name: &str| {
        record.get(index).ok_or_else(|| IdxlensError::DataSource {
            reason: format!("missing {} column", name),
        })
    };
    let numeric = |index: usize, name: &str| -> Result<f64, IdxlensError> {
        field(index, name)?
            .parse()
            .map_err(|e| IdxlensError::DataSource {
                reason: format!("invalid {} value: {}", name, e),
            })
    };

    let date = NaiveDate::parse_from_str(field(0, "date")?, "%Y-%m-%d").map_err(|e| {
        IdxlensError::DataSource {
            reason: format!("invalid date: {}", e),
        }
    })?;
    let volume: i64 = field(5, "volume")?
        .parse()
        .map_err(|e| IdxlensError::DataSource {
            reason: format!("invalid volume value: {}", e),
        })?;

    Ok(PriceBar {
        date,
        open: numeric(1, "open")?,
        high: numeric(2, "high")?,
        low: numeric(3, "low")?,
        close: numeric(4, "close")?,
        volume,
    })
}

impl DataPort for CsvDataAdapter {
    fn fetch_prices(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, IdxlensError> {
        let bars: Vec<PriceBar> = self
            .read_bars(ticker)?
            .into_iter()
            .filter(|b| b.date >= start_date && b.date <= end_date)
            .collect();

        if bars.is_empty() {
            return Err(IdxlensError::NoData {
                ticker: ticker.to_string(),
            });
        }

        PriceSeries::new(ticker.to_string(), bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, IdxlensError> {
        let entries = fs::read_dir(&self.base_dir).map_err(|e| IdxlensError::DataSource {
            reason: format!("failed to read directory {}: {}", self.base_dir.display(), e),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| IdxlensError::DataSource {
                reason: format!("directory entry error: {}", e),
            })?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(ticker) = name.strip_suffix(".csv") {
                symbols.push(ticker.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, IdxlensError> {
        if !self.csv_path(ticker).exists() {
            return Ok(None);
        }

        let bars = self.read_bars(ticker)?;
        Ok(match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, bars.len())),
            _ => None,
        })
    }
}
