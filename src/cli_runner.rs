//! The single top-level boundary between the pipeline and the process.
//!
//! Only this layer prints results and decides the exit code; the library
//! returns errors and never terminates the process itself.

use std::process::ExitCode;

use crate::archiver::{ArchiveReport, Archiver};
use crate::{cli, logging};

/// Parses arguments, runs the archiver and prints the archive path on stdout.
pub fn run_cli_app() -> Result<ArchiveReport, Box<dyn std::error::Error>> {
    let args = cli::run()?;
    logging::init_logging();

    let archiver = Archiver::new(args.into_config());
    tracing::debug!(config = ?archiver.config(), "starting run");
    let report = archiver.run()?;

    if !report.is_clean() {
        tracing::warn!(
            failed = report.deletion_failures.len(),
            archived = report.archived.len(),
            "some originals could not be removed"
        );
    }
    println!("{}", report.archive_path.display());
    Ok(report)
}

/// Maps the outcome of [`run_cli_app`] to a process exit code.
///
/// clap errors exit through clap itself so `--help` and `--version` keep
/// their usual output and status.
pub fn exit_code(result: Result<ArchiveReport, Box<dyn std::error::Error>>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(clap_err) = e.downcast_ref::<clap::Error>() {
                clap_err.exit();
            }
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
