use std::path::PathBuf;

use thiserror::Error;
use zip::result::ZipError;

/// The primary error type for all operations in the `zipsweep` crate.
///
/// Every variant except [`ArchiverError::Deletion`] is fatal to a run: the
/// pipeline stops at the first one and performs no later step.
#[derive(Debug, Error)]
pub enum ArchiverError {
    /// The target directory could not be listed (missing, not a directory,
    /// permission denied).
    #[error("couldn't read files from directory '{}': {source}", path.display())]
    DirectoryRead { path: PathBuf, source: std::io::Error },

    /// A prefix or suffix did not compile into a valid pattern.
    #[error("failed to compile pattern '{pattern}': {source}")]
    InvalidPattern { pattern: String, source: regex::Error },

    /// Fewer candidates matched than were requested.
    #[error("not enough files to be zipped: found {found}, required {required}")]
    InsufficientFiles { found: usize, required: usize },

    /// A required count of zero leaves no first entry to name the archive after.
    #[error("required count is 0, nothing to archive")]
    NothingToArchive,

    /// A selected file could not be read into the archive.
    #[error("error reading file '{}': {source}", path.display())]
    FileRead { path: PathBuf, source: std::io::Error },

    /// The archive writer rejected an entry or its content.
    #[error("error writing entry '{name}' into the archive: {source}")]
    ArchiveWrite { name: String, source: ZipError },

    /// The central directory could not be written when closing the archive.
    #[error("error closing archive writer: {0}")]
    ArchiveFinalize(#[source] ZipError),

    /// The finished archive could not be written to disk.
    #[error("error writing archive '{}': {source}", path.display())]
    ArchivePersist { path: PathBuf, source: std::io::Error },

    /// An archived original could not be removed. Never aborts a run.
    #[error("failed to remove file '{}': {source}", path.display())]
    Deletion { path: PathBuf, source: std::io::Error },
}
