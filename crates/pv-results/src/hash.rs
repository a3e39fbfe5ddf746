//! Content hashing for vector files and manifests.

use crate::ResultsResult;
use pv_controls::SimulationParameters;
use sha2::{Digest, Sha256};

/// Hex SHA-256 of `bytes`.
pub fn digest(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Identifier derived from everything that determines a vector's content.
pub fn compute_vector_id(
    scenario_id: &str,
    params: &SimulationParameters,
    generator_version: &str,
) -> ResultsResult<String> {
    let mut hasher = Sha256::new();

    hasher.update(scenario_id.as_bytes());

    let params_json = serde_json::to_string(params)?;
    hasher.update(params_json.as_bytes());

    hasher.update(generator_version.as_bytes());

    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}
