//! Plain-text vector files.
//!
//! One row per sample, five tab-separated columns `t e y_P y_PI y_PID`, every
//! value printed with eight decimals, no header.

use crate::{ResultsError, ResultsResult};
use pv_controls::{Column, TestVectorRow, TestVectorTable};
use std::path::Path;

/// Render `table` in the vector file layout.
///
/// Fails on the first non-finite value; nothing is rendered partially.
pub fn format_table(table: &TestVectorTable) -> ResultsResult<String> {
    let mut out = String::with_capacity(table.len() * Column::ALL.len() * 16);
    for (row_index, row) in table.rows().iter().enumerate() {
        for (column, value) in Column::ALL.into_iter().zip(row.values()) {
            if !value.is_finite() {
                return Err(ResultsError::NonFinite {
                    row: row_index,
                    column,
                    value,
                });
            }
            if column != Column::Time {
                out.push('\t');
            }
            out.push_str(&format!("{value:.8}"));
        }
        out.push('\n');
    }
    Ok(out)
}

/// Parse a vector file body.
///
/// Any whitespace separates columns and blank lines are skipped. Line numbers
/// in errors are 1-based.
pub fn parse_table(text: &str) -> ResultsResult<TestVectorTable> {
    let mut rows = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != Column::ALL.len() {
            return Err(ResultsError::Parse {
                line: line_no,
                reason: format!(
                    "expected {} columns, found {}",
                    Column::ALL.len(),
                    fields.len()
                ),
            });
        }

        let mut values = [0.0; 5];
        for ((slot, field), column) in values.iter_mut().zip(&fields).zip(Column::ALL) {
            let value: f64 = field.parse().map_err(|_| ResultsError::Parse {
                line: line_no,
                reason: format!("column {column}: '{field}' is not a number"),
            })?;
            if !value.is_finite() {
                return Err(ResultsError::Parse {
                    line: line_no,
                    reason: format!("column {column}: '{field}' is not finite"),
                });
            }
            *slot = value;
        }
        rows.push(TestVectorRow::from_values(values));
    }
    Ok(TestVectorTable::from_rows(rows))
}

/// Render and write `table` to `path`, returning the written text.
///
/// The file is only created once rendering has succeeded.
pub fn write_table(path: &Path, table: &TestVectorTable) -> ResultsResult<String> {
    let text = format_table(table)?;
    write_rendered(path, &text)?;
    Ok(text)
}

/// Write text already produced by [`format_table`].
pub fn write_rendered(path: &Path, text: &str) -> ResultsResult<()> {
    std::fs::write(path, text).map_err(|source| ResultsError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_table(path: &Path) -> ResultsResult<TestVectorTable> {
    let text = std::fs::read_to_string(path).map_err(|source| ResultsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(&text)
}
