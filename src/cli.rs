//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvDataAdapter;
use crate::adapters::dashboard::DashboardReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::analysis::{analyze_universe, AllocationRule, AnalysisConfig};
use crate::domain::config_validation::validate_analysis_config;
use crate::domain::error::IdxlensError;
use crate::domain::indicator_set::IndicatorConfig;
use crate::domain::universe::{parse_tickers, validate_universe};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "idxlens", about = "Technical analysis and scoring for IDX equities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full analysis pipeline
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// List tickers available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show data range for ticker(s)
    Info {
        #[arg(long)]
        ticker: Option<String>,
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            config,
            ticker,
            output_dir,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_analyze(&config, ticker.as_deref(), output_dir.as_deref())
            }
        }
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Info { ticker, config } => run_info(ticker.as_deref(), &config),
    }
}

pub fn load_config(path: &std::path::Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = IdxlensError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_analysis_config(
    adapter: &FileConfigAdapter,
) -> Result<AnalysisConfig, IdxlensError> {
    let start_date = read_date(adapter, "start_date")?;
    let end_date = read_date(adapter, "end_date")?;

    let indicators = IndicatorConfig {
        short_window: adapter.get_usize("analysis", "short_window", 20),
        medium_window: adapter.get_usize("analysis", "medium_window", 50),
        long_window: adapter.get_usize("analysis", "long_window", 200),
        rsi_period: adapter.get_usize("analysis", "rsi_period", 14),
        risk_free_rate: adapter.get_double("analysis", "risk_free_rate", 0.0),
        trading_days_per_year: adapter.get_int("analysis", "trading_days_per_year", 252) as f64,
    };

    let benchmark = adapter
        .get_string("analysis", "benchmark")
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty());

    Ok(AnalysisConfig {
        start_date,
        end_date,
        indicators,
        benchmark,
        allocation: build_allocation_rule(adapter)?,
    })
}

fn read_date(adapter: &dyn ConfigPort, key: &str) -> Result<NaiveDate, IdxlensError> {
    let value = adapter
        .get_string("analysis", key)
        .ok_or_else(|| IdxlensError::ConfigMissing {
            section: "analysis".into(),
            key: key.into(),
        })?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| IdxlensError::ConfigInvalid {
        section: "analysis".into(),
        key: key.into(),
        reason: "invalid date format (expected YYYY-MM-DD)".into(),
    })
}

pub fn build_allocation_rule(
    adapter: &FileConfigAdapter,
) -> Result<AllocationRule, IdxlensError> {
    let rule = match adapter.get_string("report", "allocation") {
        None => return Ok(AllocationRule::None),
        Some(value) => value.to_lowercase(),
    };

    match rule.as_str() {
        "none" => Ok(AllocationRule::None),
        "equal" => Ok(AllocationRule::Equal),
        "score_weighted" => Ok(AllocationRule::ScoreWeighted),
        "explicit" => {
            // configparser lowercases keys; tickers go back to uppercase.
            let mut entries = Vec::new();
            for key in adapter.section_keys("report") {
                if let Some(ticker) = key.strip_prefix("weight.") {
                    let weight = adapter.get_double("report", &key, f64::NAN);
                    if weight.is_nan() {
                        return Err(IdxlensError::ConfigInvalid {
                            section: "report".into(),
                            key,
                            reason: "weight must be numeric".into(),
                        });
                    }
                    entries.push((ticker.to_uppercase(), weight));
                }
            }
            if entries.is_empty() {
                return Err(IdxlensError::ConfigMissing {
                    section: "report".into(),
                    key: "weight.<ticker>".into(),
                });
            }
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Ok(AllocationRule::Explicit(entries))
        }
        other => Err(IdxlensError::ConfigInvalid {
            section: "report".into(),
            key: "allocation".into(),
            reason: format!("unknown allocation rule: {other}"),
        }),
    }
}

pub fn resolve_tickers(ticker_override: Option<&str>, config: &dyn ConfigPort) -> Vec<String> {
    if let Some(t) = ticker_override {
        return vec![t.trim().to_uppercase()];
    }

    match config.get_string("analysis", "tickers") {
        Some(tickers) => match parse_tickers(&tickers) {
            Ok(parsed) => parsed,
            Err(e) => {
                eprintln!("error: failed to parse tickers: {e}");
                vec![]
            }
        },
        None => vec![],
    }
}

fn run_analyze(
    config_path: &std::path::Path,
    ticker_override: Option<&str>,
    output_override: Option<&std::path::Path>,
) -> ExitCode {
    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_analysis_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 2: Build analysis config and resolve the universe
    let analysis_config = match build_analysis_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let tickers = resolve_tickers(ticker_override, &adapter);
    if tickers.is_empty() {
        eprintln!("error: no tickers configured");
        return ExitCode::from(2);
    }

    // Stage 3: Data port
    let data_port = match CsvDataAdapter::from_config(&adapter) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 4: Validate universe
    eprintln!(
        "Validating {} tickers, {} to {}...",
        tickers.len(),
        analysis_config.start_date,
        analysis_config.end_date
    );
    let validation = match validate_universe(
        &data_port,
        tickers,
        analysis_config.start_date,
        analysis_config.end_date,
        analysis_config.min_bars(),
    ) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 5: Indicators, scores, correlation, weights
    eprintln!("Analyzing {} tickers...", validation.tickers.len());
    let result = match analyze_universe(
        &data_port,
        &validation.tickers,
        validation.skipped,
        &analysis_config,
    ) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 6: Console summary
    println!("=== Scores ===");
    for analysis in &result.tickers {
        match &analysis.score {
            Some(score) => println!(
                "  {}: {}/5 {}",
                analysis.ticker, score.total, score.recommendation
            ),
            None => println!("  {}: not scored (insufficient history)", analysis.ticker),
        }
    }
    if let Some(weights) = &result.weights {
        println!("=== Allocation ===");
        for (ticker, weight) in weights.iter() {
            println!("  {}: {:.1}%", ticker, weight * 100.0);
        }
    }

    // Stage 7: Write dashboard and summary
    let output_dir = output_override.map(PathBuf::from).unwrap_or_else(|| {
        PathBuf::from(
            adapter
                .get_string("report", "output_dir")
                .unwrap_or_else(|| "./reports".to_string()),
        )
    });

    let reporter = DashboardReportAdapter::new();
    match reporter.write(&result, &output_dir) {
        Ok(paths) => {
            eprintln!("\nReport written to:");
            for path in paths {
                eprintln!("  {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write report: {e}");
            (&e).into()
        }
    }
}

pub fn run_dry_run(config_path: &std::path::Path) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_analysis_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    let config = match build_analysis_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Config validated successfully");

    let tickers = resolve_tickers(None, &adapter);
    if tickers.is_empty() {
        eprintln!("error: no tickers configured");
        return ExitCode::from(2);
    }

    eprintln!("\nUniverse: {}", tickers.join(", "));
    eprintln!("Range:    {} to {}", config.start_date, config.end_date);
    eprintln!(
        "Windows:  MA {}/{}/{}, RSI {}",
        config.indicators.short_window,
        config.indicators.medium_window,
        config.indicators.long_window,
        config.indicators.rsi_period
    );
    eprintln!(
        "Rates:    risk-free {:.3}, {} trading days/year",
        config.indicators.risk_free_rate, config.indicators.trading_days_per_year
    );
    if let Some(benchmark) = &config.benchmark {
        eprintln!("Benchmark: {}", benchmark);
    }
    let allocation = match &config.allocation {
        AllocationRule::None => "none".to_string(),
        AllocationRule::Equal => "equal".to_string(),
        AllocationRule::ScoreWeighted => "score_weighted".to_string(),
        AllocationRule::Explicit(entries) => format!("explicit ({} weights)", entries.len()),
    };
    eprintln!("Allocation: {}", allocation);

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &std::path::Path) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let adapter = match CsvDataAdapter::from_config(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = match adapter.list_symbols() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No symbols found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

fn run_info(ticker_override: Option<&str>, config_path: &std::path::Path) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let tickers = resolve_tickers(ticker_override, &config);
    if tickers.is_empty() {
        eprintln!("error: no tickers configured (use --ticker or set [analysis] tickers)");
        return ExitCode::from(2);
    }

    let adapter = match CsvDataAdapter::from_config(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for ticker in &tickers {
        match adapter.data_range(ticker) {
            Ok(Some((min_date, max_date, count))) => {
                println!("{}: {} bars, {} to {}", ticker, count, min_date, max_date);
            }
            Ok(None) => {
                eprintln!("{}: no data found", ticker);
            }
            Err(e) => {
                eprintln!("error querying {}: {}", ticker, e);
            }
        }
    }
    ExitCode::SUCCESS
}
