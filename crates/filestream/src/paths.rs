// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Staging and publish directory handling

use crate::error::{Result, StreamError};
use crate::fs::StreamFs;
use std::path::{Path, PathBuf};

/// Strip trailing separators from a directory path
///
/// `/var/tmp/export/` becomes `/var/tmp/export`; the root stays `/`.
pub fn normalize_dir(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(StreamError::InvalidDirectory {
            reason: "path is empty".to_string(),
        });
    }
    Ok(path.components().collect())
}

/// Normalize a directory and create it (with parents) when it is missing
pub fn ensure_dir<F: StreamFs>(fs: &F, path: &Path) -> Result<PathBuf> {
    let dir = normalize_dir(path)?;
    if !fs.exists(&dir) {
        fs.create_dir_all(&dir)
            .map_err(|source| StreamError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        tracing::debug!(path = %dir.display(), "created directory");
    }
    Ok(dir)
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
