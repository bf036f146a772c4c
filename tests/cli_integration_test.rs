//! CLI-facing configuration tests: config loading, analysis config
//! building, ticker resolution and allocation rule parsing.

use idxlens::adapters::file_config_adapter::FileConfigAdapter;
use idxlens::cli::{build_allocation_rule, build_analysis_config, load_config, resolve_tickers};
use idxlens::domain::analysis::AllocationRule;
use idxlens::domain::config_validation::validate_analysis_config;
use idxlens::domain::error::IdxlensError;
use chrono::NaiveDate;
use std::io::Write;

const BASE_CONFIG: &str = r#"
[analysis]
tickers = BBCA,BBRI,TLKM,ASII
start_date = 2023-01-01
end_date = 2024-01-01
short_window = 20
medium_window = 50
long_window = 200
rsi_period = 14
risk_free_rate = 0.055
trading_days_per_year = 252
benchmark = IHSG

[data]
csv_dir = ./data

[report]
output_dir = ./reports
allocation = score_weighted
"#;

fn adapter(content: &str) -> FileConfigAdapter {
    FileConfigAdapter::from_string(content).unwrap()
}

#[test]
fn build_analysis_config_reads_all_fields() {
    let config = build_analysis_config(&adapter(BASE_CONFIG)).unwrap();

    assert_eq!(
        config.start_date,
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
    );
    assert_eq!(config.end_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(config.indicators.short_window, 20);
    assert_eq!(config.indicators.medium_window, 50);
    assert_eq!(config.indicators.long_window, 200);
    assert_eq!(config.indicators.rsi_period, 14);
    assert_eq!(config.indicators.risk_free_rate, 0.055);
    assert_eq!(config.indicators.trading_days_per_year, 252.0);
    assert_eq!(config.benchmark, Some("IHSG".to_string()));
    assert_eq!(config.allocation, AllocationRule::ScoreWeighted);
}

#[test]
fn build_analysis_config_defaults() {
    let minimal = "[analysis]\ntickers = BBCA\nstart_date = 2023-01-01\nend_date = 2024-01-01\n";
    let config = build_analysis_config(&adapter(minimal)).unwrap();

    assert_eq!(config.indicators.short_window, 20);
    assert_eq!(config.indicators.medium_window, 50);
    assert_eq!(config.indicators.long_window, 200);
    assert_eq!(config.indicators.rsi_period, 14);
    assert_eq!(config.indicators.risk_free_rate, 0.0);
    assert_eq!(config.benchmark, None);
    assert_eq!(config.allocation, AllocationRule::None);
    assert_eq!(config.min_bars(), 201);
}

#[test]
fn build_analysis_config_missing_dates() {
    let result = build_analysis_config(&adapter("[analysis]\ntickers = BBCA\n"));
    assert!(matches!(
        result,
        Err(IdxlensError::ConfigMissing { key, .. }) if key == "start_date"
    ));
}

#[test]
fn build_analysis_config_bad_date() {
    let content = "[analysis]\ntickers = BBCA\nstart_date = Jan 1\nend_date = 2024-01-01\n";
    let result = build_analysis_config(&adapter(content));
    assert!(matches!(
        result,
        Err(IdxlensError::ConfigInvalid { key, .. }) if key == "start_date"
    ));
}

#[test]
fn resolve_tickers_from_config() {
    let tickers = resolve_tickers(None, &adapter(BASE_CONFIG));
    assert_eq!(tickers, vec!["BBCA", "BBRI", "TLKM", "ASII"]);
}

#[test]
fn resolve_tickers_override_wins() {
    let tickers = resolve_tickers(Some("bmri"), &adapter(BASE_CONFIG));
    assert_eq!(tickers, vec!["BMRI"]);
}

#[test]
fn resolve_tickers_empty_without_config_key() {
    let tickers = resolve_tickers(None, &adapter("[analysis]\n"));
    assert!(tickers.is_empty());
}

#[test]
fn resolve_tickers_malformed_list_is_empty() {
    let tickers = resolve_tickers(None, &adapter("[analysis]\ntickers = BBCA,,BBRI\n"));
    assert!(tickers.is_empty());
}

#[test]
fn allocation_rule_defaults_to_none() {
    let rule = build_allocation_rule(&adapter("[report]\n")).unwrap();
    assert_eq!(rule, AllocationRule::None);
}

#[test]
fn allocation_rule_parses_variants() {
    let equal = build_allocation_rule(&adapter("[report]\nallocation = equal\n")).unwrap();
    assert_eq!(equal, AllocationRule::Equal);

    let scored =
        build_allocation_rule(&adapter("[report]\nallocation = SCORE_WEIGHTED\n")).unwrap();
    assert_eq!(scored, AllocationRule::ScoreWeighted);
}

#[test]
fn allocation_rule_explicit_reads_weights_uppercased() {
    let content = "[report]\nallocation = explicit\nweight.bbca = 0.6\nweight.bbri = 0.4\n";
    let rule = build_allocation_rule(&adapter(content)).unwrap();

    assert_eq!(
        rule,
        AllocationRule::Explicit(vec![
            ("BBCA".to_string(), 0.6),
            ("BBRI".to_string(), 0.4),
        ])
    );
}

#[test]
fn allocation_rule_explicit_without_weights_fails() {
    let result = build_allocation_rule(&adapter("[report]\nallocation = explicit\n"));
    assert!(matches!(result, Err(IdxlensError::ConfigMissing { .. })));
}

#[test]
fn allocation_rule_unknown_fails() {
    let result = build_allocation_rule(&adapter("[report]\nallocation = markowitz\n"));
    assert!(matches!(
        result,
        Err(IdxlensError::ConfigInvalid { key, .. }) if key == "allocation"
    ));
}

#[test]
fn validate_rejects_incomplete_config() {
    let result = validate_analysis_config(&adapter("[analysis]\ntickers = BBCA\n"));
    assert!(result.is_err());
}

#[test]
fn load_config_from_file_roundtrip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", BASE_CONFIG).unwrap();

    let adapter = load_config(file.path()).unwrap();
    let config = build_analysis_config(&adapter).unwrap();
    assert_eq!(config.indicators.rsi_period, 14);
}

#[test]
fn load_config_missing_file_fails() {
    assert!(load_config(std::path::Path::new("/nonexistent/idxlens.ini")).is_err());
}
