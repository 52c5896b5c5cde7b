// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Atomic publication of staged files
//!
//! A staged file becomes visible under its final name in one rename. When
//! staging and publish directories sit on different filesystems the file is
//! first copied to a hidden sibling inside the publish directory, and that
//! sibling is renamed into place, so the final name never shows a partial file.

use crate::fs::{is_cross_device, StreamFs};
use std::io;
use std::path::{Path, PathBuf};

/// Suffix of the hidden sibling used by the cross-device fallback
pub const PARTIAL_SUFFIX: &str = ".partial";

/// Move `staged` to `dest`, falling back to copy-then-rename across devices
pub fn publish<F: StreamFs>(fs: &F, staged: &Path, dest: &Path) -> io::Result<()> {
    match fs.rename(staged, dest) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => publish_by_copy(fs, staged, dest),
        Err(e) => Err(e),
    }
}

fn publish_by_copy<F: StreamFs>(fs: &F, staged: &Path, dest: &Path) -> io::Result<()> {
    let partial = partial_path(dest);
    tracing::debug!(
        staged = %staged.display(),
        partial = %partial.display(),
        "publishing across devices"
    );

    if let Err(e) = fs.copy(staged, &partial).and_then(|_| fs.rename(&partial, dest)) {
        // Best effort: the partial sibling must not linger next to published files
        if fs.exists(&partial) {
            let _ = fs.remove_file(&partial);
        }
        return Err(e);
    }

    // The destination is complete; a leftover staged copy is only clutter
    if let Err(e) = fs.remove_file(staged) {
        tracing::warn!(staged = %staged.display(), error = %e, "failed to remove staged copy");
    }
    Ok(())
}

/// Hidden sibling of `dest` used while copying: `dir/.name.partial`
pub fn partial_path(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    dest.with_file_name(format!(".{name}{PARTIAL_SUFFIX}"))
}

#[cfg(test)]
#[path = "publish_tests.rs"]
mod tests;
