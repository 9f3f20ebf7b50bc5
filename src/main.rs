use std::process::ExitCode;

use miette::Report;
use nugraph::error::NugraphError;

/// Main entry point for the nugraph CLI tool
fn main() -> ExitCode {
    // Install miette's panic and error handler for beautiful error reporting
    miette::set_panic_hook();

    match nugraph::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("{report:?}");
            ExitCode::from(exit_code(&report))
        }
    }
}

/// Walk the error chain for the domain error that names the exit code;
/// context layers added along the way do not carry one
fn exit_code(report: &Report) -> u8 {
    report
        .chain()
        .find_map(|cause| cause.downcast_ref::<NugraphError>())
        .map_or(1, NugraphError::exit_code)
}
