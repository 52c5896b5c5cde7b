// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File name templating
//!
//! A template like `sitemap{count}.xml` resolves to `sitemap0.xml`,
//! `sitemap1.xml`, ... when rotation is enabled. Without rotation the
//! template is the file name, placeholder and all.

use crate::error::{Result, StreamError};
use std::path::{Component, Path};

/// Validated file name template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate {
    template: String,
    placeholder: String,
    rotating: bool,
}

impl NameTemplate {
    /// Validate a template for a stream that does (or does not) rotate
    pub fn new(
        template: impl Into<String>,
        placeholder: impl Into<String>,
        rotating: bool,
    ) -> Result<Self> {
        let template = template.into();
        let placeholder = placeholder.into();

        if placeholder.is_empty() {
            return Err(StreamError::EmptyPlaceholder);
        }
        if rotating && !template.contains(&placeholder) {
            return Err(StreamError::MissingPlaceholder {
                template,
                placeholder,
            });
        }

        let this = Self {
            template,
            placeholder,
            rotating,
        };
        // Sequence 0 is representative: digits never introduce separators
        this.check_file_name(&this.resolve(0))?;
        Ok(this)
    }

    /// Resolve the file name for the given sequence number
    ///
    /// Every occurrence of the placeholder is replaced when rotating;
    /// otherwise the template comes back verbatim.
    pub fn resolve(&self, sequence: u64) -> String {
        if self.rotating {
            self.template
                .replace(&self.placeholder, &sequence.to_string())
        } else {
            self.template.clone()
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    /// Resolved names are joined onto both directories, so they must be a
    /// single normal path component.
    fn check_file_name(&self, name: &str) -> Result<()> {
        let invalid = |reason: &str| StreamError::InvalidTemplate {
            template: self.template.clone(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("resolves to an empty name"));
        }
        if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
            return Err(invalid("contains a path separator"));
        }

        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(invalid("is not a plain file name")),
        }
    }
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
