//! Main entry point for the zipsweep CLI app

fn main() -> std::process::ExitCode {
    zipsweep::cli_runner::exit_code(zipsweep::cli_runner::run_cli_app())
}
