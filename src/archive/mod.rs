//! # In-memory ZIP assembly
//!
//! [`ArchiveBuffer`] accumulates the compressed archive in memory. Nothing
//! touches the disk until the finished bytes are handed to
//! [`crate::fsx::persist_atomically`], so a failure while adding entries
//! leaves no trace.

use std::collections::HashSet;
use std::io::{self, Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::common::DirectoryEntry;
use crate::ArchiverError;

/// Extension appended to the derived archive name.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Default deflate level.
pub const DEFAULT_LEVEL: u32 = 6;

/// A writer for a flat ZIP archive held entirely in memory.
pub struct ArchiveBuffer {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: FileOptions,
    names: HashSet<String>,
}

impl ArchiveBuffer {
    /// Creates an empty archive. Level 0 stores entries uncompressed,
    /// levels 1-9 deflate them.
    pub fn new(level: u32) -> Self {
        let options = if level == 0 {
            FileOptions::default().compression_method(CompressionMethod::Stored)
        } else {
            FileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(level.min(9) as i32))
        };
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: options.unix_permissions(0o644),
            names: HashSet::new(),
        }
    }

    /// Adds one entry named `name` holding `data`.
    ///
    /// The name is stored exactly as given. It must be a bare file name,
    /// not empty and without `/`, and unique within the archive; anything else
    /// is rejected before a byte is written.
    pub fn add_entry(&mut self, name: &str, data: &[u8]) -> Result<(), ArchiverError> {
        let write_err = |source| ArchiverError::ArchiveWrite { name: name.to_string(), source };

        check_entry_name(name).map_err(|e| write_err(e.into()))?;
        if self.names.contains(name) {
            let dup = io::Error::new(io::ErrorKind::AlreadyExists, "duplicate entry name");
            return Err(write_err(dup.into()));
        }

        self.writer.start_file(name, self.options).map_err(write_err)?;
        self.writer.write_all(data).map_err(|e| write_err(e.into()))?;
        self.names.insert(name.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Writes the central directory and returns the complete archive bytes.
    pub fn finish(mut self) -> Result<Vec<u8>, ArchiverError> {
        let cursor = self.writer.finish().map_err(ArchiverError::ArchiveFinalize)?;
        Ok(cursor.into_inner())
    }
}

/// Rejects names that would give an entry a directory component or none at
/// all. Base names from a directory listing always pass.
fn check_entry_name(name: &str) -> io::Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{name}' is not a bare file name"),
        ));
    }
    Ok(())
}

/// Derives the archive file name from the selection:
/// `<first>.zip`, or `<first>-<last>.zip` when more than one entry was selected.
///
/// Returns `None` for an empty selection.
pub fn archive_file_name(selected: &[DirectoryEntry]) -> Option<String> {
    let first = selected.first()?;
    let mut name = first.name.clone();
    if selected.len() > 1 {
        if let Some(last) = selected.last() {
            name.push('-');
            name.push_str(&last.name);
        }
    }
    Some(format!("{name}.{ARCHIVE_EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn entry(name: &str) -> DirectoryEntry {
        DirectoryEntry::new(name, false, 0)
    }

    #[test]
    fn test_archive_name_single_and_range() {
        assert_eq!(archive_file_name(&[entry("a.sql")]).as_deref(), Some("a.sql.zip"));
        assert_eq!(
            archive_file_name(&[entry("a.sql"), entry("m.sql"), entry("z.sql")]).as_deref(),
            Some("a.sql-z.sql.zip")
        );
        assert_eq!(archive_file_name(&[]), None);
    }

    #[test]
    fn test_entry_names_are_stored_verbatim() -> Result<(), Box<dyn std::error::Error>> {
        let mut buf = ArchiveBuffer::new(DEFAULT_LEVEL);
        buf.add_entry("c:x.sql", b"FIRST")?;
        buf.add_entry("x.sql", b"SECOND")?;
        buf.add_entry("old\\y.sql", b"THIRD")?;

        let zip = ZipArchive::new(Cursor::new(buf.finish()?))?;
        let names: Vec<_> = zip.file_names().collect();
        assert_eq!(names.len(), 3);
        for expected in ["c:x.sql", "x.sql", "old\\y.sql"] {
            assert!(names.contains(&expected), "missing {expected}");
        }
        Ok(())
    }

    #[test]
    fn test_path_like_and_duplicate_names_are_rejected() {
        let mut buf = ArchiveBuffer::new(DEFAULT_LEVEL);
        for bad in ["", ".", "..", "dir/a.sql", "/abs.sql"] {
            let err = buf.add_entry(bad, b"x").unwrap_err();
            assert!(matches!(err, ArchiverError::ArchiveWrite { .. }), "{bad:?} accepted");
        }
        buf.add_entry("a.sql", b"x").unwrap();
        let err = buf.add_entry("a.sql", b"y").unwrap_err();
        assert!(matches!(err, ArchiverError::ArchiveWrite { .. }));
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn test_buffer_holds_exact_bytes() -> Result<(), Box<dyn std::error::Error>> {
        let mut buf = ArchiveBuffer::new(DEFAULT_LEVEL);
        buf.add_entry("one.sql", b"select 1;")?;
        buf.add_entry("two.sql", &[0u8, 1, 2, 255])?;
        assert_eq!(buf.len(), 2);

        let bytes = buf.finish()?;
        let mut zip = ZipArchive::new(Cursor::new(bytes))?;
        assert_eq!(zip.len(), 2);

        let mut content = Vec::new();
        zip.by_name("two.sql")?.read_to_end(&mut content)?;
        assert_eq!(content, vec![0u8, 1, 2, 255]);

        let first = zip.by_index(0)?;
        assert_eq!(first.name(), "one.sql");
        assert_eq!(first.compression(), CompressionMethod::Deflated);
        Ok(())
    }

    #[test]
    fn test_level_zero_stores() -> Result<(), Box<dyn std::error::Error>> {
        let mut buf = ArchiveBuffer::new(0);
        buf.add_entry("raw.sql", b"raw")?;
        let mut zip = ZipArchive::new(Cursor::new(buf.finish()?))?;
        assert_eq!(zip.by_index(0)?.compression(), CompressionMethod::Stored);
        Ok(())
    }

    #[test]
    fn test_empty_buffer_finishes() -> Result<(), Box<dyn std::error::Error>> {
        let buf = ArchiveBuffer::new(DEFAULT_LEVEL);
        assert!(buf.is_empty());
        let zip = ZipArchive::new(Cursor::new(buf.finish()?))?;
        assert_eq!(zip.len(), 0);
        Ok(())
    }
}
