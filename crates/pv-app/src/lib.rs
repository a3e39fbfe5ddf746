//! Shared application service layer for pidvec.
//!
//! Loads and validates generator configurations, compiles scenarios into
//! simulation parameters, produces vector files with optional manifests and
//! compares vector files produced by other implementations.

pub mod compile;
pub mod compare_service;
pub mod error;
pub mod generate_service;
pub mod project_service;

// Re-export key types for convenience
pub use compare_service::{compare_vectors, ensure_passed};
pub use compile::{compile_excitation, compile_scenario, project_gains};
pub use error::{AppError, AppResult};
pub use generate_service::{
    GENERATOR_VERSION, GenerateOptions, GenerateRequest, GenerateResponse, GeneratedVector,
    SimulationOutput, coefficients, generate, generate_project, simulate,
};
pub use project_service::{
    ScenarioSummary, get_scenario, list_scenarios, load_project, save_project, validate_project,
};
