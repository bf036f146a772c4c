//! Domain error types.

/// Top-level error type for idxlens.
#[derive(Debug, thiserror::Error)]
pub enum IdxlensError {
    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("malformed price series for {ticker}: {reason}")]
    MalformedSeries { ticker: String, reason: String },

    #[error("no data for {ticker}")]
    NoData { ticker: String },

    #[error("insufficient data for {ticker}: have {bars} bars, need {minimum}")]
    InsufficientData {
        ticker: String,
        bars: usize,
        minimum: usize,
    },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&IdxlensError> for std::process::ExitCode {
    fn from(err: &IdxlensError) -> Self {
        let code: u8 = match err {
            IdxlensError::Io(_) | IdxlensError::Report { .. } => 1,
            IdxlensError::ConfigParse { .. }
            | IdxlensError::ConfigMissing { .. }
            | IdxlensError::ConfigInvalid { .. } => 2,
            IdxlensError::DataSource { .. } => 3,
            IdxlensError::MalformedSeries { .. } => 4,
            IdxlensError::NoData { .. } | IdxlensError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
