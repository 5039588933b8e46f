//! # Archiver pipeline
//!
//! One linear pass: list, filter, validate, select, archive, finalize, name,
//! persist, delete. Every stage before deletion is fatal on error and stops
//! the run before anything later happens. The archive is on disk before the
//! first original is removed.
//!
//! The run assumes nothing else mutates the directory meanwhile; no locking
//! or snapshotting is attempted.

use std::path::{Path, PathBuf};

use crate::archive::{archive_file_name, ArchiveBuffer, DEFAULT_LEVEL};
use crate::common::{DirectoryEntry, FileSet};
use crate::filter::{ListingOrder, NameFilter, PatternMode};
use crate::fsx as fs;
use crate::ArchiverError;

/// Parameters of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiverConfig {
    pub dir: PathBuf,
    pub required_count: usize,
    pub prefix: String,
    pub suffix: String,
    pub pattern_mode: PatternMode,
    pub order: ListingOrder,
    /// Deflate level, 0 stores.
    pub level: u32,
}

impl Default for ArchiverConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./"),
            required_count: 0,
            prefix: String::new(),
            suffix: ".sql".to_string(),
            pattern_mode: PatternMode::default(),
            order: ListingOrder::default(),
            level: DEFAULT_LEVEL,
        }
    }
}

impl ArchiverConfig {
    pub fn new(dir: impl Into<PathBuf>, required_count: usize) -> Self {
        Self { dir: dir.into(), required_count, ..Self::default() }
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn pattern_mode(mut self, mode: PatternMode) -> Self {
        self.pattern_mode = mode;
        self
    }

    pub fn order(mut self, order: ListingOrder) -> Self {
        self.order = order;
        self
    }

    pub fn level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct ArchiveReport {
    pub archive_path: PathBuf,
    /// The entries stored in the archive, in selection order.
    pub archived: Vec<DirectoryEntry>,
    /// Originals that were archived but could not be removed.
    /// Each is an [`ArchiverError::Deletion`].
    pub deletion_failures: Vec<ArchiverError>,
}

impl ArchiveReport {
    pub fn is_clean(&self) -> bool {
        self.deletion_failures.is_empty()
    }
}

pub struct Archiver {
    config: ArchiverConfig,
}

impl Archiver {
    pub fn new(config: ArchiverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ArchiverConfig {
        &self.config
    }

    /// Runs the whole pipeline once.
    pub fn run(&self) -> Result<ArchiveReport, ArchiverError> {
        let cfg = &self.config;
        let dir = cfg.dir.as_path();

        let listed = list(dir, cfg.order)?;
        let filter = NameFilter::new(&cfg.prefix, &cfg.suffix, cfg.pattern_mode)?;
        let candidates = filter.candidates(listed);
        tracing::debug!(
            dir = %dir.display(),
            candidates = candidates.len(),
            candidate_bytes = candidates.total_size(),
            "filtered directory listing"
        );

        let selected = select(&candidates, cfg.required_count)?;
        let archive_name = archive_file_name(selected).ok_or(ArchiverError::NothingToArchive)?;

        let bytes = build_archive(dir, selected, cfg.level)?;
        let archive_path = dir.join(&archive_name);
        persist(&archive_path, &bytes)?;
        tracing::info!(
            archive = %archive_path.display(),
            files = selected.len(),
            bytes = bytes.len(),
            "archive written"
        );

        let deletion_failures = delete_originals(dir, selected);
        Ok(ArchiveReport {
            archive_path,
            archived: selected.to_vec(),
            deletion_failures,
        })
    }
}

/// Archives the first `required_count` files in `dir` whose names match
/// `^(prefix)` and `suffix$`, deletes them, and returns the archive path.
///
/// Uses the default pattern mode, listing order and compression level.
/// Deletion failures are logged and do not make this fail.
pub fn run(
    dir: impl AsRef<Path>,
    required_count: usize,
    prefix: &str,
    suffix: &str,
) -> Result<PathBuf, ArchiverError> {
    let config = ArchiverConfig::new(dir.as_ref(), required_count).prefix(prefix).suffix(suffix);
    Archiver::new(config).run().map(|report| report.archive_path)
}

/// Lists `dir` non-recursively and applies `order`.
pub fn list(dir: &Path, order: ListingOrder) -> Result<FileSet, ArchiverError> {
    let entries = fs::list_entries(dir)
        .map_err(|source| ArchiverError::DirectoryRead { path: dir.to_path_buf(), source })?;
    Ok(order.apply(entries))
}

/// The first `required_count` candidates.
pub fn select(candidates: &FileSet, required_count: usize) -> Result<&[DirectoryEntry], ArchiverError> {
    if required_count == 0 {
        return Err(ArchiverError::NothingToArchive);
    }
    candidates.first(required_count).ok_or(ArchiverError::InsufficientFiles {
        found: candidates.len(),
        required: required_count,
    })
}

/// Reads every selected file from `dir` into a fresh archive and returns the
/// finished bytes.
pub fn build_archive(dir: &Path, selected: &[DirectoryEntry], level: u32) -> Result<Vec<u8>, ArchiverError> {
    let mut buffer = ArchiveBuffer::new(level);
    for entry in selected {
        let path = dir.join(&entry.name);
        let data = fs::read(&path).map_err(|source| ArchiverError::FileRead { path: path.clone(), source })?;
        buffer.add_entry(&entry.name, &data)?;
        tracing::debug!(file = %entry.name, size = data.len(), "added to archive");
    }
    buffer.finish()
}

/// Writes the finished archive to `path`.
///
/// A file already at `path` is replaced. This is the one non-selected file a
/// run may change, so it is logged.
pub fn persist(path: &Path, bytes: &[u8]) -> Result<(), ArchiverError> {
    if path.is_file() {
        tracing::warn!(archive = %path.display(), "replacing existing archive");
    }
    fs::persist_atomically(path, bytes, fs::ARCHIVE_MODE)
        .map_err(|source| ArchiverError::ArchivePersist { path: path.to_path_buf(), source })
}

/// Removes every selected file from `dir`, continuing past failures.
///
/// Returns one [`ArchiverError::Deletion`] per file that could not be removed.
pub fn delete_originals(dir: &Path, selected: &[DirectoryEntry]) -> Vec<ArchiverError> {
    let mut failures = Vec::new();
    for entry in selected {
        let path = dir.join(&entry.name);
        if let Err(source) = fs::remove_file(&path) {
            let err = ArchiverError::Deletion { path, source };
            tracing::warn!("{err}");
            failures.push(err);
        }
    }
    failures
}
