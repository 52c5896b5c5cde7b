// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! filestream: staged, rotating file output
//!
//! This crate provides:
//! - `FileStream`, which writes a logical stream into files staged in a
//!   temporary directory and atomically published to a destination directory
//! - Optional header/footer bracketing of every file
//! - Optional rotation into sequentially numbered files after N writes
//! - A filesystem seam (`StreamFs`) with real, traced, and fake implementations

pub mod config;
pub mod error;
pub mod fs;
pub mod paths;
pub mod publish;
pub mod stream;
pub mod template;


pub use config::{StreamConfig, DEFAULT_PLACEHOLDER};
pub use error::{ErrorKind, Result, StreamError};
pub use fs::{RealFs, StreamFs, TracedFs};
pub use stream::FileStream;
pub use template::NameTemplate;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use fs::{FakeFile, FakeFs, FsCall, FsFault};
