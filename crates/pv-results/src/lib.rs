//! pv-results: test-vector files, manifests and cross-implementation checks.

pub mod compare;
pub mod format;
pub mod hash;
pub mod staging;
pub mod store;
pub mod types;

pub use compare::{ColumnStats, CompareOptions, ComparisonReport, compare_files, compare_tables};
pub use format::{format_table, parse_table, read_table, write_rendered, write_table};
pub use hash::{compute_vector_id, digest};
pub use staging::OutputBatch;
pub use store::{load_manifest, manifest_json, manifest_path, save_manifest, verify_output};
pub use types::*;

use pv_controls::Column;
use std::path::PathBuf;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("Failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Non-finite value {value} in row {row}, column {column}")]
    NonFinite {
        row: usize,
        column: Column,
        value: f64,
    },

    #[error("Row count mismatch: {left} vs {right}")]
    RowCountMismatch { left: usize, right: usize },

    #[error("Manifest not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
