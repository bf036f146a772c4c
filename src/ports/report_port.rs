//! Report generation port trait.

use crate::domain::analysis::AnalysisResult;
use crate::domain::error::IdxlensError;
use std::path::{Path, PathBuf};

/// Port for writing analysis reports. Returns the paths written so the CLI
/// can list them.
pub trait ReportPort {
    fn write(
        &self,
        result: &AnalysisResult,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, IdxlensError>;
}
