use clap::Parser;
use std::path::PathBuf;

use crate::archive::DEFAULT_LEVEL;
use crate::archiver::ArchiverConfig;
use crate::filter::{ListingOrder, PatternMode};

/// Archive a batch of matching files from a directory into one ZIP and remove the originals.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory with the files to compress. Not searched recursively.
    #[arg(short = 'd', long = "dir", default_value = "./")]
    pub dir: PathBuf,

    /// Filename suffix, a regex fragment anchored at the end of the name.
    #[arg(short, long, default_value = ".sql", allow_hyphen_values = true)]
    pub suffix: String,

    /// Filename prefix, a regex fragment anchored at the start of the name.
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    pub prefix: String,

    /// Exact number of files to compress.
    #[arg(short = 'n', long = "count", default_value_t = 0)]
    pub count: u32,

    /// Match --prefix and --suffix as plain text instead of regex fragments.
    #[arg(long)]
    pub literal: bool,

    /// Order in which files are considered when taking the first N matches.
    #[arg(long, value_enum, default_value_t = ListingOrder::Name)]
    pub order: ListingOrder,

    /// Deflate level (0-9). 0 stores files uncompressed.
    #[arg(long, default_value_t = DEFAULT_LEVEL, value_parser = clap::value_parser!(u32).range(0..=9))]
    pub level: u32,
}

impl Args {
    pub fn into_config(self) -> ArchiverConfig {
        let mode = if self.literal { PatternMode::Literal } else { PatternMode::Regex };
        ArchiverConfig::new(self.dir, self.count as usize)
            .prefix(self.prefix)
            .suffix(self.suffix)
            .pattern_mode(mode)
            .order(self.order)
            .level(self.level)
    }
}

/// Parses command-line arguments using `clap`.
///
/// Returns clap's own error (help, version, bad flags) so the caller can
/// decide how to exit.
pub fn run() -> Result<Args, clap::Error> {
    Args::try_parse()
}
