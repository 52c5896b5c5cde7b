// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory filesystem for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::StreamFs;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Recorded filesystem call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsCall {
    CreateDirAll { path: PathBuf },
    Create { path: PathBuf },
    Write { path: PathBuf, len: usize },
    Sync { path: PathBuf },
    Rename { from: PathBuf, to: PathBuf },
    Copy { from: PathBuf, to: PathBuf },
    RemoveFile { path: PathBuf },
}

/// Failure modes that can be switched on for a [`FakeFs`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FsFault {
    /// `create_dir_all` fails with permission denied
    CreateDir,
    /// `create` fails with permission denied
    Open,
    /// Writes fail with storage full
    Write,
    Sync,
    /// Every rename fails
    Rename,
    /// Renames between different directories fail as if crossing devices
    CrossDevice,
    Copy,
}

#[derive(Default)]
struct FakeState {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    calls: Vec<FsCall>,
    faults: BTreeSet<FsFault>,
}

impl FakeState {
    fn check(&self, fault: FsFault) -> io::Result<()> {
        if !self.faults.contains(&fault) {
            return Ok(());
        }
        let kind = match fault {
            FsFault::Write => io::ErrorKind::StorageFull,
            FsFault::CrossDevice => io::ErrorKind::CrossesDevices,
            _ => io::ErrorKind::PermissionDenied,
        };
        Err(io::Error::new(kind, format!("injected {fault:?} fault")))
    }

    fn require_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !self.dirs.contains(parent) => {
                Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such directory: {}", parent.display()),
                ))
            }
            _ => Ok(()),
        }
    }

    fn require_file(&self, path: &Path) -> io::Result<()> {
        if self.files.contains_key(path) {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            ))
        }
    }
}

/// Fake filesystem with call recording and fault injection
///
/// Cloning creates a new handle to the same underlying state.
#[derive(Clone, Default)]
pub struct FakeFs {
    state: Arc<Mutex<FakeState>>,
}

impl FakeFs {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Switch a failure mode on until [`FakeFs::heal`] is called
    pub fn inject(&self, fault: FsFault) {
        self.state().faults.insert(fault);
    }

    /// Switch a failure mode off
    pub fn heal(&self, fault: FsFault) {
        self.state().faults.remove(&fault);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<FsCall> {
        self.state().calls.clone()
    }

    /// Content of a file, if it exists
    pub fn read(&self, path: &Path) -> Option<Vec<u8>> {
        self.state().files.get(path).cloned()
    }

    /// Content of a file as UTF-8, if it exists
    pub fn read_string(&self, path: &Path) -> Option<String> {
        self.read(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Paths of all files directly inside `dir`
    pub fn list(&self, dir: &Path) -> Vec<PathBuf> {
        self.state()
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect()
    }

    pub fn has_dir(&self, path: &Path) -> bool {
        self.state().dirs.contains(path)
    }
}

impl StreamFs for FakeFs {
    type File = FakeFile;

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state();
        state.calls.push(FsCall::CreateDirAll {
            path: path.to_path_buf(),
        });
        state.check(FsFault::CreateDir)?;
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                state.dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn create(&self, path: &Path) -> io::Result<FakeFile> {
        let mut state = self.state();
        state.calls.push(FsCall::Create {
            path: path.to_path_buf(),
        });
        state.check(FsFault::Open)?;
        state.require_parent(path)?;
        state.files.insert(path.to_path_buf(), Vec::new());
        Ok(FakeFile {
            path: path.to_path_buf(),
            state: Arc::clone(&self.state),
        })
    }

    // Records empty writes too, which `Write::write_all` would skip
    fn write_all(&self, file: &mut FakeFile, buf: &[u8]) -> io::Result<()> {
        file.write(buf).map(|_| ())
    }

    fn sync(&self, file: &mut FakeFile) -> io::Result<()> {
        let mut state = self.state();
        state.calls.push(FsCall::Sync {
            path: file.path.clone(),
        });
        state.check(FsFault::Sync)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut state = self.state();
        state.calls.push(FsCall::Rename {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
        state.check(FsFault::Rename)?;
        if from.parent() != to.parent() {
            state.check(FsFault::CrossDevice)?;
        }
        state.require_file(from)?;
        state.require_parent(to)?;
        if let Some(content) = state.files.remove(from) {
            state.files.insert(to.to_path_buf(), content);
        }
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        let mut state = self.state();
        state.calls.push(FsCall::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
        state.check(FsFault::Copy)?;
        state.require_file(from)?;
        state.require_parent(to)?;
        let content = state.files.get(from).cloned().unwrap_or_default();
        let len = content.len() as u64;
        state.files.insert(to.to_path_buf(), content);
        Ok(len)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state();
        state.calls.push(FsCall::RemoveFile {
            path: path.to_path_buf(),
        });
        state.require_file(path)?;
        state.files.remove(path);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.state();
        state.files.contains_key(path) || state.dirs.contains(path)
    }
}

/// Open handle into a [`FakeFs`]
pub struct FakeFile {
    path: PathBuf,
    state: Arc<Mutex<FakeState>>,
}

impl Write for FakeFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(FsCall::Write {
            path: self.path.clone(),
            len: buf.len(),
        });
        state.check(FsFault::Write)?;
        state
            .files
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
