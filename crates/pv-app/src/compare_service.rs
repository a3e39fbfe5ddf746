//! Comparison of vector files from independent implementations.

use std::path::Path;

use pv_results::{CompareOptions, ComparisonReport, compare_files};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

pub fn compare_vectors(
    left: &Path,
    right: &Path,
    options: &CompareOptions,
) -> AppResult<ComparisonReport> {
    info!(left = %left.display(), right = %right.display(), "comparing vectors");
    let report = compare_files(left, right, options)?;

    for stats in &report.columns {
        debug!(
            column = %stats.column,
            max_abs_deviation = stats.max_abs_deviation,
            variance = stats.variance,
            "column statistics"
        );
    }

    if report.passed() {
        info!(rows = report.rows, identical = report.identical, "vectors agree");
    } else {
        warn!(rows = report.rows, failing = ?report.failing_columns(), "vectors disagree");
    }
    Ok(report)
}

/// Turn a failed report into an error.
pub fn ensure_passed(report: &ComparisonReport) -> AppResult<()> {
    if report.passed() {
        return Ok(());
    }
    let columns = report
        .failing_columns()
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(AppError::ComparisonFailed { columns })
}
