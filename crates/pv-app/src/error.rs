//! Error types for the pv-app service layer.

use pv_controls::ControlError;
use pv_results::ResultsError;

/// Application error type wrapping the backend crates' errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Simulation error: {0}")]
    Control(#[from] ControlError),

    #[error("Results error: {0}")]
    Results(#[from] ResultsError),

    #[error("Comparison failed: columns {columns} exceed the acceptance limits")]
    ComparisonFailed { columns: String },
}

/// Result type for pv-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<pv_project::ProjectError> for AppError {
    fn from(err: pv_project::ProjectError) -> Self {
        match err {
            pv_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}
