//! Configuration validation.
//!
//! Checks every `[analysis]`, `[data]` and `[report]` field before the
//! pipeline runs, so bad configs fail fast with a precise message.

use crate::domain::error::IdxlensError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), IdxlensError> {
    validate_tickers(config)?;
    validate_dates(config)?;
    validate_windows(config)?;
    validate_rsi_period(config)?;
    validate_risk_free_rate(config)?;
    validate_trading_days(config)?;
    validate_allocation(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> IdxlensError {
    IdxlensError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_tickers(config: &dyn ConfigPort) -> Result<(), IdxlensError> {
    match config.get_string("analysis", "tickers") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(IdxlensError::ConfigMissing {
            section: "analysis".to_string(),
            key: "tickers".to_string(),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), IdxlensError> {
    let start = parse_date(config, "start_date")?;
    let end = parse_date(config, "end_date")?;

    if start >= end {
        return Err(invalid(
            "analysis",
            "start_date",
            "start_date must be before end_date",
        ));
    }
    Ok(())
}

fn parse_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, IdxlensError> {
    match config.get_string("analysis", key) {
        None => Err(IdxlensError::ConfigMissing {
            section: "analysis".to_string(),
            key: key.to_string(),
        }),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|_| invalid("analysis", key, "invalid date format, expected YYYY-MM-DD")),
    }
}

fn validate_windows(config: &dyn ConfigPort) -> Result<(), IdxlensError> {
    let short = config.get_usize("analysis", "short_window", 20);
    let medium = config.get_usize("analysis", "medium_window", 50);
    let long = config.get_usize("analysis", "long_window", 200);

    if short == 0 {
        return Err(invalid("analysis", "short_window", "window must be positive"));
    }
    if !(short < medium && medium < long) {
        return Err(invalid(
            "analysis",
            "short_window",
            "windows must satisfy short < medium < long",
        ));
    }
    Ok(())
}

fn validate_rsi_period(config: &dyn ConfigPort) -> Result<(), IdxlensError> {
    if config.get_usize("analysis", "rsi_period", 14) == 0 {
        return Err(invalid("analysis", "rsi_period", "rsi_period must be positive"));
    }
    Ok(())
}

fn validate_risk_free_rate(config: &dyn ConfigPort) -> Result<(), IdxlensError> {
    let value = config.get_double("analysis", "risk_free_rate", 0.0);
    if !(0.0..1.0).contains(&value) {
        return Err(invalid(
            "analysis",
            "risk_free_rate",
            "risk_free_rate must be between 0 and 1",
        ));
    }
    Ok(())
}

fn validate_trading_days(config: &dyn ConfigPort) -> Result<(), IdxlensError> {
    if config.get_int("analysis", "trading_days_per_year", 252) <= 0 {
        return Err(invalid(
            "analysis",
            "trading_days_per_year",
            "trading_days_per_year must be positive",
        ));
    }
    Ok(())
}

fn validate_allocation(config: &dyn ConfigPort) -> Result<(), IdxlensError> {
    match config.get_string("report", "allocation") {
        None => Ok(()),
        Some(value) => match value.to_lowercase().as_str() {
            "none" | "equal" | "score_weighted" | "explicit" => Ok(()),
            _ => Err(invalid(
                "report",
                "allocation",
                "expected one of: none, equal, score_weighted, explicit",
            )),
        },
    }
}
