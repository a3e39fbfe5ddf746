//! Manifest data types.

use pv_controls::SimulationParameters;
use serde::{Deserialize, Serialize};

pub type VectorId = String;

/// Sidecar record describing one written vector file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorManifest {
    pub vector_id: VectorId,
    pub scenario_id: String,
    /// File name of the vector, relative to the manifest.
    pub output: String,
    pub parameters: SimulationParameters,
    pub rows: usize,
    pub sha256: String,
    pub generator_version: String,
    pub timestamp: String,
}

impl VectorManifest {
    /// Manifest for `text` written at `output`, stamped with the current time.
    pub fn new(
        vector_id: VectorId,
        scenario_id: &str,
        output: &str,
        parameters: &SimulationParameters,
        rows: usize,
        text: &str,
        generator_version: &str,
    ) -> Self {
        Self {
            vector_id,
            scenario_id: scenario_id.to_string(),
            output: output.to_string(),
            parameters: parameters.clone(),
            rows,
            sha256: crate::hash::digest(text.as_bytes()),
            generator_version: generator_version.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
