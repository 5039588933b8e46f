//! Common types shared by the pipeline stages.

/// A single entry directly inside the scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Base name of the entry, never containing a path separator.
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, is_dir: bool, size: u64) -> Self {
        Self { name: name.into(), is_dir, size }
    }
}

/// An ordered collection of directory entries.
///
/// The order is whatever produced the set (the directory read, possibly
/// re-sorted by a [`crate::filter::ListingOrder`]); nothing in here reorders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    entries: Vec<DirectoryEntry>,
}

impl FileSet {
    pub fn new(entries: Vec<DirectoryEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Keeps only the entries accepted by `keep`, preserving order.
    pub fn retain<F>(self, mut keep: F) -> FileSet
    where
        F: FnMut(&DirectoryEntry) -> bool,
    {
        FileSet { entries: self.entries.into_iter().filter(|e| keep(e)).collect() }
    }

    /// The first `n` entries, or `None` if there are fewer than `n`.
    pub fn first(&self, n: usize) -> Option<&[DirectoryEntry]> {
        self.entries.get(..n)
    }

    /// Total size in bytes of all entries.
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }
}

impl FromIterator<DirectoryEntry> for FileSet {
    fn from_iter<I: IntoIterator<Item = DirectoryEntry>>(iter: I) -> Self {
        FileSet { entries: iter.into_iter().collect() }
    }
}
