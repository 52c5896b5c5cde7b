// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for file streams

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring or writing a file stream
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("file name {placeholder} placeholder is needed: {template}")]
    MissingPlaceholder {
        template: String,
        placeholder: String,
    },
    #[error("rotation threshold must be positive")]
    ZeroThreshold,
    #[error("placeholder token must not be empty")]
    EmptyPlaceholder,
    #[error("invalid file name template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },
    #[error("invalid directory: {reason}")]
    InvalidDirectory { reason: String },
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("cannot create directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("cannot open file {name}: {source}")]
    Open { name: String, source: io::Error },
    #[error("cannot write to file {name}: {source}")]
    Write { name: String, source: io::Error },
    #[error("cannot sync file {name}: {source}")]
    Sync { name: String, source: io::Error },
    #[error("cannot publish {name} from {} to {}: {source}", .from.display(), .to.display())]
    Publish {
        name: String,
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
    #[error("cannot read config {}: {source}", .path.display())]
    ReadConfig { path: PathBuf, source: io::Error },

    #[error("stream unusable after failed write to {name}")]
    Poisoned { name: String },
    #[error("file {name} already published and rotation is disabled")]
    AlreadyPublished { name: String },
}

/// Coarse classification of a [`StreamError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid construction arguments; never recovered
    Configuration,
    /// Failure from the storage layer; the operation may be retried
    Io,
    /// The stream is in a state that refuses the operation
    State,
}

impl StreamError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StreamError::MissingPlaceholder { .. }
            | StreamError::ZeroThreshold
            | StreamError::EmptyPlaceholder
            | StreamError::InvalidTemplate { .. }
            | StreamError::InvalidDirectory { .. }
            | StreamError::Config(_) => ErrorKind::Configuration,
            StreamError::CreateDir { .. }
            | StreamError::Open { .. }
            | StreamError::Write { .. }
            | StreamError::Sync { .. }
            | StreamError::Publish { .. }
            | StreamError::ReadConfig { .. } => ErrorKind::Io,
            StreamError::Poisoned { .. } | StreamError::AlreadyPublished { .. } => {
                ErrorKind::State
            }
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    pub fn is_io(&self) -> bool {
        self.kind() == ErrorKind::Io
    }
}

pub type Result<T, E = StreamError> = std::result::Result<T, E>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
