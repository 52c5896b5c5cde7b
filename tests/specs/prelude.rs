//! Shared helpers for behavioral specs

pub use filestream::{ErrorKind, FileStream, StreamConfig, StreamError};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Staging and publish directories under a fresh temp dir
pub struct Dirs {
    _root: TempDir,
    pub stage: PathBuf,
    pub public: PathBuf,
}

impl Dirs {
    /// Directories that do not exist yet; the stream creates them
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let stage = root.path().join("var").join("tmp");
        let public = root.path().join("srv").join("public");
        Self {
            _root: root,
            stage,
            public,
        }
    }

    pub fn config(&self, template: &str) -> StreamConfig {
        StreamConfig::new(template, &self.stage, &self.public)
    }

    pub fn published(&self, name: &str) -> FileCheck {
        FileCheck::new(self.public.join(name))
    }

    pub fn staged(&self, name: &str) -> FileCheck {
        FileCheck::new(self.stage.join(name))
    }

    /// Sorted file names in the publish directory
    pub fn published_names(&self) -> Vec<String> {
        list_names(&self.public)
    }

    /// Sorted file names in the staging directory
    pub fn staged_names(&self) -> Vec<String> {
        list_names(&self.stage)
    }
}

fn list_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Fluent assertions on a single file
pub struct FileCheck {
    path: PathBuf,
}

impl FileCheck {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn has_content(self, expected: &str) -> Self {
        let actual = std::fs::read_to_string(&self.path)
            .unwrap_or_else(|e| panic!("cannot read {}: {}", self.path.display(), e));
        similar_asserts::assert_eq!(actual, expected);
        self
    }

    pub fn exists(self) -> Self {
        assert!(self.path.exists(), "expected {} to exist", self.path.display());
        self
    }

    pub fn missing(self) -> Self {
        assert!(
            !self.path.exists(),
            "expected {} to be absent",
            self.path.display()
        );
        self
    }
}
