//! Manifest files stored next to their vectors as `<file>.manifest.json`.

use crate::hash::digest;
use crate::types::VectorManifest;
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};

pub fn manifest_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".manifest.json");
    output.with_file_name(name)
}

/// Manifest as written to disk.
pub fn manifest_json(manifest: &VectorManifest) -> ResultsResult<String> {
    Ok(serde_json::to_string_pretty(manifest)?)
}

pub fn save_manifest(output: &Path, manifest: &VectorManifest) -> ResultsResult<PathBuf> {
    let path = manifest_path(output);
    let json = manifest_json(manifest)?;
    fs::write(&path, json).map_err(|source| ResultsError::FileWrite {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

pub fn load_manifest(output: &Path) -> ResultsResult<VectorManifest> {
    let path = manifest_path(output);
    if !path.exists() {
        return Err(ResultsError::ManifestNotFound { path });
    }
    let content = fs::read_to_string(&path).map_err(|source| ResultsError::FileRead {
        path: path.clone(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Whether the vector at `output` still matches the digest in its manifest.
pub fn verify_output(output: &Path) -> ResultsResult<bool> {
    let manifest = load_manifest(output)?;
    let bytes = fs::read(output).map_err(|source| ResultsError::FileRead {
        path: output.to_path_buf(),
        source,
    })?;
    Ok(digest(&bytes) == manifest.sha256)
}
