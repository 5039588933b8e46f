//! Cross-platform filesystem wrapper.
//!
//! Re-exports `std::fs` and adds the few helpers the pipeline needs on top of
//! it: a flat directory listing, POSIX permission bits, and an atomic
//! write-then-rename. The rest of the crate imports `crate::fsx as fs` instead
//! of touching `std::fs` directly.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::common::DirectoryEntry;

pub use std::fs::*;

/// Permission bits given to every archive written by [`persist_atomically`].
pub const ARCHIVE_MODE: u32 = 0o644;

#[cfg(unix)]
/// Set POSIX permission bits on Unix.
pub fn set_unix_permissions(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
/// No-op off Unix: POSIX permission bits do not exist there.
pub fn set_unix_permissions(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}

/// Lists the entries directly inside `dir`, in the order the platform returns them.
///
/// Symlinks are reported as themselves, not followed. Names that are not valid
/// UTF-8 are skipped since no string pattern can select them.
pub fn list_entries(dir: &Path) -> io::Result<Vec<DirectoryEntry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                tracing::debug!(name = ?raw, "skipping non UTF-8 entry");
                continue;
            }
        };
        let meta = entry.metadata()?;
        entries.push(DirectoryEntry::new(name, meta.is_dir(), meta.len()));
    }
    Ok(entries)
}

/// Writes `bytes` to `path` through a temporary sibling file that is renamed
/// into place, so readers never observe a half-written file.
///
/// An existing file at `path` is replaced. On error the temporary file is removed.
pub fn persist_atomically(path: &Path, bytes: &[u8], mode: u32) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    set_unix_permissions(tmp.path(), mode)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
