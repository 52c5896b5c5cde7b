// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `std::fs` backed implementation

use super::StreamFs;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Directory mode for created staging and publish directories
#[cfg(unix)]
const DIR_MODE: u32 = 0o755;

/// Real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl StreamFs for RealFs {
    type File = File;

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(DIR_MODE);
        }
        builder.create(path)
    }

    fn create(&self, path: &Path) -> io::Result<File> {
        File::create(path)
    }

    fn sync(&self, file: &mut File) -> io::Result<()> {
        file.sync_all()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        let bytes = fs::copy(from, to)?;
        // fs::copy does not sync; the copy must be durable before it is renamed into place.
        // Flushing needs a writable handle on some platforms.
        OpenOptions::new().write(true).open(to)?.sync_all()?;
        Ok(bytes)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
#[path = "real_tests.rs"]
mod tests;
