//! # zipsweep
//!
//! Sweeps a bounded batch of files out of a directory: the first N entries
//! whose names match a prefix and a suffix are packed into one ZIP archive
//! next to them, and the originals are removed once the archive is on disk.
//!
//! ## Key Modules
//!
//! - [`archiver`]: the pipeline and its configuration.
//! - [`filter`]: prefix/suffix patterns and listing order.
//! - [`archive`]: the in-memory ZIP writer and archive naming.
//! - [`fsx`]: filesystem helpers (flat listing, atomic persist).
//!
//! ## Examples
//!
//! ```no_run
//! // Archive the first three `db_*.sql` dumps in /var/backups.
//! let path = zipsweep::run("/var/backups", 3, "db_", ".sql")?;
//! println!("wrote {}", path.display());
//! # Ok::<(), zipsweep::ArchiverError>(())
//! ```

pub mod archive;
pub mod archiver;
pub mod cli;
pub mod cli_runner;
pub mod common;
pub mod error;
pub mod filter;
pub mod fsx;
pub mod logging;

pub use archiver::{run, ArchiveReport, Archiver, ArchiverConfig};
pub use error::ArchiverError;
