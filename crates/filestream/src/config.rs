// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stream configuration
//!
//! A stream can be configured in code:
//!
//! ```
//! use filestream::StreamConfig;
//!
//! let config = StreamConfig::new("sitemap{count}.xml", "/tmp/sitemaps", "/srv/public")
//!     .header("<urlset>\n")
//!     .footer("</urlset>\n")
//!     .rotate_after(50_000);
//! assert_eq!(config.rotate_after, Some(50_000));
//! ```
//!
//! or loaded from TOML:
//!
//! ```toml
//! name_template = "export{count}.csv"
//! staging_dir = "/var/tmp/export"
//! publish_dir = "/srv/export"
//! header = "id,name\n"
//! rotate_after = 1000
//! ```
//!
//! Header and footer are raw bytes. In TOML they are written as a string, or
//! as an array of byte values when they are not valid UTF-8
//! (`header = [255, 0]`).

use crate::error::{Result, StreamError};
use crate::template::NameTemplate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Placeholder replaced by the file sequence number
pub const DEFAULT_PLACEHOLDER: &str = "{count}";

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_sync_on_publish() -> bool {
    true
}

/// Configuration for a [`FileStream`](crate::FileStream)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamConfig {
    /// File name, e.g. `export.yml` or `sitemap{count}.xml`
    pub name_template: String,
    /// Where files are written while incomplete
    pub staging_dir: PathBuf,
    /// Where files appear once complete
    pub publish_dir: PathBuf,
    /// Written at the start of every file; `None` omits it
    #[serde(
        default,
        with = "text_or_bytes",
        skip_serializing_if = "Option::is_none"
    )]
    pub header: Option<Vec<u8>>,
    /// Written at the end of every file; `None` omits it
    #[serde(
        default,
        with = "text_or_bytes",
        skip_serializing_if = "Option::is_none"
    )]
    pub footer: Option<Vec<u8>>,
    /// Counted writes per file before rotating; `None` writes a single file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate_after: Option<u64>,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Sync each file to stable storage before publishing it
    #[serde(default = "default_sync_on_publish")]
    pub sync_on_publish: bool,
}

impl StreamConfig {
    pub fn new(
        name_template: impl Into<String>,
        staging_dir: impl Into<PathBuf>,
        publish_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name_template: name_template.into(),
            staging_dir: staging_dir.into(),
            publish_dir: publish_dir.into(),
            header: None,
            footer: None,
            rotate_after: None,
            placeholder: default_placeholder(),
            sync_on_publish: default_sync_on_publish(),
        }
    }

    pub fn header(mut self, header: impl Into<Vec<u8>>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn footer(mut self, footer: impl Into<Vec<u8>>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn rotate_after(mut self, writes: u64) -> Self {
        self.rotate_after = Some(writes);
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn sync_on_publish(mut self, sync: bool) -> Self {
        self.sync_on_publish = sync;
        self
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| StreamError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check the rotation threshold and name template without touching disk
    pub fn validate(&self) -> Result<NameTemplate> {
        if self.rotate_after == Some(0) {
            return Err(StreamError::ZeroThreshold);
        }
        NameTemplate::new(
            self.name_template.as_str(),
            self.placeholder.as_str(),
            self.rotate_after.is_some(),
        )
    }
}

/// Header and footer bytes in TOML: a string when the bytes are UTF-8,
/// otherwise an array of byte values
mod text_or_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Bytes(Vec<u8>),
    }

    pub fn serialize<S: Serializer>(
        value: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            None => serializer.serialize_none(),
            Some(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => serializer.serialize_some(text),
                Err(_) => serializer.serialize_some(bytes),
            },
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        Ok(Option::<Repr>::deserialize(deserializer)?.map(|repr| match repr {
            Repr::Text(text) => text.into_bytes(),
            Repr::Bytes(bytes) => bytes,
        }))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
