//! Cross-implementation comparison of two vector tables.
//!
//! Two checks are reported side by side: exact equality of the parsed values,
//! and per-column deviation statistics judged against a tolerance on the
//! largest absolute deviation and a threshold on the sample variance
//! `sum((a - b)^2) / N`.

use crate::format::read_table;
use crate::{ResultsError, ResultsResult};
use pv_controls::{Column, TestVectorTable};
use pv_core::slices_identical;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompareOptions {
    /// Largest accepted absolute deviation in any column.
    pub tolerance: f64,
    /// Largest accepted per-column variance.
    pub variance_threshold: f64,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            variance_threshold: 2e-13,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub column: Column,
    pub max_abs_deviation: f64,
    /// First row where `max_abs_deviation` occurs; `None` when the column matches.
    pub max_deviation_row: Option<usize>,
    pub squared_error_sum: f64,
    pub variance: f64,
}

impl ColumnStats {
    fn compute(column: Column, left: &[f64], right: &[f64]) -> Self {
        let mut max_abs_deviation = 0.0;
        let mut max_deviation_row = None;
        let mut squared_error_sum = 0.0;
        for (row, (a, b)) in left.iter().zip(right).enumerate() {
            let deviation = (a - b).abs();
            if deviation > max_abs_deviation {
                max_abs_deviation = deviation;
                max_deviation_row = Some(row);
            }
            squared_error_sum += (a - b) * (a - b);
        }
        let variance = if left.is_empty() {
            0.0
        } else {
            squared_error_sum / left.len() as f64
        };
        Self {
            column,
            max_abs_deviation,
            max_deviation_row,
            squared_error_sum,
            variance,
        }
    }

    pub fn within(&self, options: &CompareOptions) -> bool {
        self.max_abs_deviation <= options.tolerance && self.variance <= options.variance_threshold
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub rows: usize,
    /// Every parsed value is bit-for-bit equal.
    pub identical: bool,
    pub columns: Vec<ColumnStats>,
    pub options: CompareOptions,
}

impl ComparisonReport {
    pub fn passed(&self) -> bool {
        self.identical || self.columns.iter().all(|c| c.within(&self.options))
    }

    pub fn column(&self, column: Column) -> Option<&ColumnStats> {
        self.columns.iter().find(|c| c.column == column)
    }

    /// Columns that exceed the tolerance or the variance threshold.
    pub fn failing_columns(&self) -> Vec<Column> {
        self.columns
            .iter()
            .filter(|c| !c.within(&self.options))
            .map(|c| c.column)
            .collect()
    }
}

pub fn compare_tables(
    left: &TestVectorTable,
    right: &TestVectorTable,
    options: &CompareOptions,
) -> ResultsResult<ComparisonReport> {
    if left.len() != right.len() {
        return Err(ResultsError::RowCountMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    let mut identical = true;
    let mut columns = Vec::with_capacity(Column::ALL.len());
    for column in Column::ALL {
        let a = left.column(column);
        let b = right.column(column);
        identical &= slices_identical(&a, &b);
        columns.push(ColumnStats::compute(column, &a, &b));
    }

    Ok(ComparisonReport {
        rows: left.len(),
        identical,
        columns,
        options: *options,
    })
}

pub fn compare_files(
    left: &Path,
    right: &Path,
    options: &CompareOptions,
) -> ResultsResult<ComparisonReport> {
    let left = read_table(left)?;
    let right = read_table(right)?;
    compare_tables(&left, &right, options)
}
