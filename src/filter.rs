//! Candidate selection: name patterns and listing order.
//!
//! The prefix is compiled as `^(prefix)` and the suffix as `suffix$`. In
//! [`PatternMode::Regex`] both are used as given, so metacharacters keep their
//! regex meaning (`a.b` also matches `axb`). [`PatternMode::Literal`] escapes
//! them first.

use clap::ValueEnum;
use regex::Regex;

use crate::common::{DirectoryEntry, FileSet};
use crate::ArchiverError;

/// How prefix and suffix strings are turned into patterns.
#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PatternMode {
    /// Interpolate the strings into the regex unescaped.
    #[default]
    Regex,
    /// Match the strings as plain text.
    Literal,
}

/// Order in which listed entries are considered for selection.
#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ListingOrder {
    /// Byte-wise ascending by name.
    #[default]
    Name,
    /// Whatever the platform's directory read returns. Not stable across platforms.
    Native,
}

impl ListingOrder {
    pub fn apply(self, mut entries: Vec<DirectoryEntry>) -> FileSet {
        if self == ListingOrder::Name {
            entries.sort_by(|a, b| a.name.cmp(&b.name));
        }
        FileSet::new(entries)
    }
}

/// Compiled prefix and suffix patterns.
#[derive(Debug, Clone)]
pub struct NameFilter {
    prefix: Regex,
    suffix: Regex,
}

impl NameFilter {
    pub fn new(prefix: &str, suffix: &str, mode: PatternMode) -> Result<Self, ArchiverError> {
        let (prefix, suffix) = match mode {
            PatternMode::Regex => (prefix.to_string(), suffix.to_string()),
            PatternMode::Literal => (regex::escape(prefix), regex::escape(suffix)),
        };
        Ok(Self {
            prefix: compile(&format!("^({prefix})"))?,
            suffix: compile(&format!("{suffix}$"))?,
        })
    }

    pub fn matches_prefix(&self, name: &str) -> bool {
        self.prefix.is_match(name)
    }

    pub fn matches_suffix(&self, name: &str) -> bool {
        self.suffix.is_match(name)
    }

    /// Candidates of `files`: non-directories passing the prefix filter and
    /// then the suffix filter, in their original order.
    pub fn candidates(&self, files: FileSet) -> FileSet {
        files
            .retain(|e| !e.is_dir)
            .retain(|e| self.matches_prefix(&e.name))
            .retain(|e| self.matches_suffix(&e.name))
    }
}

fn compile(pattern: &str) -> Result<Regex, ArchiverError> {
    Regex::new(pattern).map_err(|source| ArchiverError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
