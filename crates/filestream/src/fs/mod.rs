// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem seam for staged writes
//!
//! Every blocking storage call a stream makes goes through [`StreamFs`],
//! so tests can inject failures without touching a real disk.

mod real;
mod traced;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use real::RealFs;
pub use traced::TracedFs;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeFile, FakeFs, FsCall, FsFault};

use std::io::{self, Write};
use std::path::Path;

/// Blocking filesystem operations used by a file stream
pub trait StreamFs {
    /// Handle to a file opened for writing; closed on drop
    type File: Write;

    /// Create a directory and any missing parents
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Open a file for writing, truncating any existing content
    fn create(&self, path: &Path) -> io::Result<Self::File>;

    /// Append bytes to an open file
    fn write_all(&self, file: &mut Self::File, buf: &[u8]) -> io::Result<()> {
        file.write_all(buf)
    }

    /// Flush file content and metadata to stable storage
    fn sync(&self, file: &mut Self::File) -> io::Result<()>;

    /// Rename a file; atomic when both paths share a filesystem
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Copy a file's content, returning the number of bytes copied
    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;
}

/// True when a rename failed only because the paths live on different filesystems
pub fn is_cross_device(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices
}
