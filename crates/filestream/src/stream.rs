// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Staged, rotating file stream
//!
//! A [`FileStream`] writes a logical stream into one or more files. Each file
//! is opened lazily in the staging directory on first write (header first),
//! and is moved to the publish directory only after its footer is written and
//! its handle closed. With rotation enabled, reaching the configured number
//! of counted writes publishes the current file and advances the sequence
//! number substituted into the next file's name.
//!
//! Dropping a stream publishes whatever is still pending. Errors at that
//! point can only be logged, so callers that care should use
//! [`FileStream::finish`] instead.

use crate::config::StreamConfig;
use crate::error::{ErrorKind, Result, StreamError};
use crate::fs::{RealFs, StreamFs, TracedFs};
use crate::paths::ensure_dir;
use crate::publish::publish;
use crate::template::NameTemplate;
use std::io;
use std::path::{Path, PathBuf};

/// A file sitting in the staging directory
#[derive(Debug, Clone)]
struct StagedFile {
    name: String,
    path: PathBuf,
}

struct OpenFile<W> {
    file: W,
    staged: StagedFile,
}

/// Lifecycle of the current file
enum Slot<W> {
    /// No file in progress
    Closed,
    /// Handle open in the staging directory
    Open(OpenFile<W>),
    /// Footer written and handle closed, but publishing failed
    Sealed(StagedFile),
    /// A write failed; the staged file is abandoned
    Failed(StagedFile),
}

/// Writer that stages files and atomically publishes them
pub struct FileStream<F: StreamFs = RealFs> {
    fs: F,
    template: NameTemplate,
    staging_dir: PathBuf,
    publish_dir: PathBuf,
    header: Option<Vec<u8>>,
    footer: Option<Vec<u8>>,
    rotate_after: Option<u64>,
    sync_on_publish: bool,
    writes: u64,
    sequence: u64,
    slot: Slot<F::File>,
    published: Vec<PathBuf>,
    finished: bool,
}

impl FileStream<RealFs> {
    /// Create a stream on the real filesystem
    pub fn open(config: StreamConfig) -> Result<Self> {
        Self::with_fs(config, RealFs)
    }
}

impl FileStream<TracedFs<RealFs>> {
    /// Create a stream on the real filesystem, emitting a `tracing` span for
    /// every filesystem call
    pub fn open_traced(config: StreamConfig) -> Result<Self> {
        Self::with_fs(config, TracedFs::new(RealFs))
    }
}

impl<F: StreamFs> FileStream<F> {
    /// Create a stream on the given filesystem
    ///
    /// Fails with a configuration error when rotation is enabled and the name
    /// template lacks the placeholder, and with an I/O error when either
    /// directory cannot be created.
    pub fn with_fs(config: StreamConfig, fs: F) -> Result<Self> {
        let template = config.validate()?;
        let staging_dir = ensure_dir(&fs, &config.staging_dir)?;
        let publish_dir = ensure_dir(&fs, &config.publish_dir)?;

        Ok(Self {
            fs,
            template,
            staging_dir,
            publish_dir,
            header: config.header,
            footer: config.footer,
            rotate_after: config.rotate_after,
            sync_on_publish: config.sync_on_publish,
            writes: 0,
            sequence: 0,
            slot: Slot::Closed,
            published: Vec::new(),
            finished: false,
        })
    }

    /// Append content, counting it toward rotation
    ///
    /// When this write reaches the rotation threshold the file is published
    /// before returning. A `Publish` error in that case means the content was
    /// accepted and the file is sealed; calling [`close_and_publish`] retries
    /// the publish.
    ///
    /// [`close_and_publish`]: FileStream::close_and_publish
    pub fn write(&mut self, content: impl AsRef<[u8]>) -> Result<()> {
        self.write_counted(content.as_ref(), true)
    }

    /// Append content without counting it toward rotation
    pub fn write_uncounted(&mut self, content: impl AsRef<[u8]>) -> Result<()> {
        self.write_counted(content.as_ref(), false)
    }

    fn write_counted(&mut self, content: &[u8], counted: bool) -> Result<()> {
        self.ensure_open()?;
        self.append(content)?;

        if counted {
            self.writes += 1;
            if self.rotate_after == Some(self.writes) {
                tracing::debug!(
                    name = %self.current_file_name(),
                    writes = self.writes,
                    "rotation threshold reached"
                );
                self.close_and_publish()?;
            }
        }
        Ok(())
    }

    /// Finish the current file and move it to the publish directory
    ///
    /// Writes the footer, closes the handle, and publishes the file under its
    /// resolved name. With nothing open, a file is opened first, so even a
    /// stream with no writes publishes one file holding header and footer.
    /// Returns the published path.
    pub fn close_and_publish(&mut self) -> Result<PathBuf> {
        if matches!(self.slot, Slot::Sealed(_)) {
            return self.publish_sealed();
        }

        self.ensure_open()?;
        if let Some(footer) = self.footer.clone() {
            self.append(&footer)?;
        }
        self.seal()?;
        self.publish_sealed()
    }

    /// Publish any pending file and return every path this stream published
    ///
    /// A stream that never published anything publishes one (possibly empty)
    /// file. A stream whose last counted write rotated, with nothing written
    /// since, publishes nothing further.
    pub fn finish(mut self) -> Result<Vec<PathBuf>> {
        self.finalize()?;
        Ok(std::mem::take(&mut self.published))
    }

    /// Sequence number of the current (or next) file
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Counted writes in the current file
    pub fn writes_in_current_file(&self) -> u64 {
        self.writes
    }

    pub fn is_open(&self) -> bool {
        matches!(self.slot, Slot::Open(_))
    }

    /// Name of the current (or next) file
    pub fn current_file_name(&self) -> String {
        self.template.resolve(self.sequence)
    }

    /// Paths published so far, in order
    pub fn published(&self) -> &[PathBuf] {
        &self.published
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    pub fn publish_dir(&self) -> &Path {
        &self.publish_dir
    }

    pub fn template(&self) -> &NameTemplate {
        &self.template
    }

    /// Open the current file in the staging directory and write the header
    fn ensure_open(&mut self) -> Result<()> {
        if let Slot::Failed(staged) = &self.slot {
            return Err(StreamError::Poisoned {
                name: staged.name.clone(),
            });
        }
        if self.is_open() {
            return Ok(());
        }
        if matches!(self.slot, Slot::Sealed(_)) {
            self.publish_sealed()?;
        }

        let name = self.current_file_name();
        if !self.template.is_rotating() && !self.published.is_empty() {
            return Err(StreamError::AlreadyPublished { name });
        }

        let path = self.staging_dir.join(&name);
        let file = self.fs.create(&path).map_err(|source| StreamError::Open {
            name: name.clone(),
            source,
        })?;
        tracing::debug!(
            name = %name,
            sequence = self.sequence,
            path = %path.display(),
            "opened staging file"
        );

        self.slot = Slot::Open(OpenFile {
            file,
            staged: StagedFile { name, path },
        });

        if let Some(header) = self.header.clone() {
            self.append(&header)?;
        }
        Ok(())
    }

    /// Write bytes to the open file; failure abandons the file
    fn append(&mut self, bytes: &[u8]) -> Result<()> {
        let result = match &mut self.slot {
            Slot::Open(open) => self.fs.write_all(&mut open.file, bytes),
            _ => Err(io::Error::other("no open file")),
        };

        result.map_err(|source| {
            let name = self.abandon();
            StreamError::Write { name, source }
        })
    }

    /// Close the open handle, syncing first when configured
    fn seal(&mut self) -> Result<()> {
        let mut open = match std::mem::replace(&mut self.slot, Slot::Closed) {
            Slot::Open(open) => open,
            other => {
                self.slot = other;
                return Ok(());
            }
        };

        if self.sync_on_publish {
            if let Err(source) = self.fs.sync(&mut open.file) {
                let name = open.staged.name.clone();
                self.slot = Slot::Failed(open.staged);
                return Err(StreamError::Sync { name, source });
            }
        }

        drop(open.file);
        self.slot = Slot::Sealed(open.staged);
        Ok(())
    }

    /// Move a sealed file to the publish directory and advance the sequence
    fn publish_sealed(&mut self) -> Result<PathBuf> {
        let Slot::Sealed(staged) = &self.slot else {
            return Err(StreamError::Publish {
                name: self.current_file_name(),
                from: self.staging_dir.join(self.current_file_name()),
                to: self.publish_dir.join(self.current_file_name()),
                source: io::Error::other("no sealed file"),
            });
        };

        let dest = self.publish_dir.join(&staged.name);
        publish(&self.fs, &staged.path, &dest).map_err(|source| StreamError::Publish {
            name: staged.name.clone(),
            from: staged.path.clone(),
            to: dest.clone(),
            source,
        })?;
        tracing::info!(
            name = %staged.name,
            sequence = self.sequence,
            path = %dest.display(),
            "published"
        );

        self.slot = Slot::Closed;
        self.published.push(dest.clone());
        self.sequence += 1;
        self.writes = 0;
        Ok(dest)
    }

    /// Drop the open handle and mark the stream failed, returning the file name
    fn abandon(&mut self) -> String {
        let staged = match std::mem::replace(&mut self.slot, Slot::Closed) {
            Slot::Open(open) => open.staged,
            Slot::Sealed(staged) | Slot::Failed(staged) => staged,
            Slot::Closed => StagedFile {
                name: self.current_file_name(),
                path: self.staging_dir.join(self.current_file_name()),
            },
        };
        let name = staged.name.clone();
        self.slot = Slot::Failed(staged);
        name
    }

    /// Publish whatever teardown owes; runs at most once
    fn finalize(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;

        if let Slot::Failed(staged) = &self.slot {
            return Err(StreamError::Poisoned {
                name: staged.name.clone(),
            });
        }
        let pending = !matches!(self.slot, Slot::Closed);
        if pending || self.published.is_empty() {
            self.close_and_publish()?;
        }
        Ok(())
    }
}

impl<F: StreamFs> Drop for FileStream<F> {
    fn drop(&mut self) {
        if let Err(e) = self.finalize() {
            let staged = self.staging_dir.join(self.current_file_name());
            if e.kind() == ErrorKind::State {
                tracing::warn!(
                    staged = %staged.display(),
                    error = %e,
                    "dropping failed stream; staged file left unpublished"
                );
            } else {
                tracing::error!(
                    staged = %staged.display(),
                    error = %e,
                    "failed to publish pending file on drop"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod tests;
