//! All-or-nothing output writes.
//!
//! Every file of a run is first written next to its target under a
//! `.partial` name. Targets are only replaced once all staged writes have
//! succeeded; dropping an uncommitted batch removes whatever was staged.

use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct OutputBatch {
    /// `(staged, target)` pairs not yet moved into place.
    pending: Vec<(PathBuf, PathBuf)>,
}

pub fn staged_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    target.with_file_name(name)
}

impl OutputBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `contents` under the staged name of `target`.
    pub fn stage(&mut self, target: &Path, contents: &str) -> ResultsResult<()> {
        let staged = staged_path(target);
        fs::write(&staged, contents).map_err(|source| ResultsError::FileWrite {
            path: target.to_path_buf(),
            source,
        })?;
        self.pending.push((staged, target.to_path_buf()));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Move every staged file onto its target, in staging order.
    pub fn commit(mut self) -> ResultsResult<Vec<PathBuf>> {
        let mut committed = Vec::with_capacity(self.pending.len());
        while let Some((staged, target)) = self.pending.first().cloned() {
            fs::rename(&staged, &target).map_err(|source| ResultsError::FileWrite {
                path: target.clone(),
                source,
            })?;
            self.pending.remove(0);
            committed.push(target);
        }
        Ok(committed)
    }
}

impl Drop for OutputBatch {
    fn drop(&mut self) {
        for (staged, _) in &self.pending {
            let _ = fs::remove_file(staged);
        }
    }
}
