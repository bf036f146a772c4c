//! Price data access port trait.

use crate::domain::error::IdxlensError;
use crate::domain::price_series::PriceSeries;
use chrono::NaiveDate;

/// Source of daily price history. The production collaborator is a
/// market-data service; the shipped adapter reads local CSV exports and the
/// tests use an in-memory mock.
pub trait DataPort {
    /// Daily bars for `ticker` within `[start_date, end_date]`, ordered by
    /// date. An empty range is reported as [`IdxlensError::NoData`], never as
    /// an empty series that could pass for real data.
    fn fetch_prices(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, IdxlensError>;

    fn list_symbols(&self) -> Result<Vec<String>, IdxlensError>;

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, IdxlensError>;
}
