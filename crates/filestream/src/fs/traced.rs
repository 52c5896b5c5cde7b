// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced filesystem wrapper for consistent observability

use super::StreamFs;
use std::io;
use std::path::Path;

/// Wrapper that adds tracing to any StreamFs
#[derive(Debug, Default, Clone)]
pub struct TracedFs<F> {
    inner: F,
}

impl<F> TracedFs<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: StreamFs> StreamFs for TracedFs<F> {
    type File = F::File;

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let span = tracing::debug_span!("fs.create_dir_all", path = %path.display());
        let _guard = span.enter();

        let result = self.inner.create_dir_all(path);
        match &result {
            Ok(()) => tracing::debug!("directory ready"),
            Err(e) => tracing::error!(error = %e, "create_dir_all failed"),
        }
        result
    }

    fn create(&self, path: &Path) -> io::Result<Self::File> {
        let span = tracing::debug_span!("fs.create", path = %path.display());
        let _guard = span.enter();

        let result = self.inner.create(path);
        match &result {
            Ok(_) => tracing::debug!("opened"),
            Err(e) => tracing::error!(error = %e, "open failed"),
        }
        result
    }

    fn write_all(&self, file: &mut Self::File, buf: &[u8]) -> io::Result<()> {
        let result = self.inner.write_all(file, buf);
        match &result {
            Ok(()) => tracing::trace!(len = buf.len(), "wrote"),
            Err(e) => tracing::error!(len = buf.len(), error = %e, "write failed"),
        }
        result
    }

    fn sync(&self, file: &mut Self::File) -> io::Result<()> {
        let start = std::time::Instant::now();
        let result = self.inner.sync(file);
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::trace!(elapsed_ms = elapsed.as_millis() as u64, "synced"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "sync failed"
            ),
        }
        result
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let span =
            tracing::debug_span!("fs.rename", from = %from.display(), to = %to.display());
        let _guard = span.enter();

        let result = self.inner.rename(from, to);
        // Cross-device failures are handled by the caller's copy fallback
        match &result {
            Ok(()) => tracing::debug!("renamed"),
            Err(e) if super::is_cross_device(e) => {
                tracing::debug!(error = %e, "rename crosses devices")
            }
            Err(e) => tracing::error!(error = %e, "rename failed"),
        }
        result
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        let span = tracing::debug_span!("fs.copy", from = %from.display(), to = %to.display());
        let _guard = span.enter();

        let result = self.inner.copy(from, to);
        match &result {
            Ok(bytes) => tracing::debug!(bytes, "copied"),
            Err(e) => tracing::error!(error = %e, "copy failed"),
        }
        result
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let result = self.inner.remove_file(path);
        match &result {
            Ok(()) => tracing::debug!(path = %path.display(), "removed"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "remove failed"),
        }
        result
    }

    fn exists(&self, path: &Path) -> bool {
        let exists = self.inner.exists(path);
        tracing::trace!(path = %path.display(), exists, "checked");
        exists
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
