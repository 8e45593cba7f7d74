//! modinspect binary entry point

use modinspect::cli::{parse_args, Command};
use modinspect::error::ErrorSeverity;
use modinspect::output::format_error_json;

fn main() {
    let args = parse_args();
    let command = Command::from_args(args);

    if let Err(err) = command.execute() {
        // the failure envelope goes to stdout so consumers always get a
        // well-formed document; diagnostics go to stderr
        print!("{}", format_error_json(&err.user_message()));

        eprintln!("{}: {}", err.severity(), err.user_message());
        if let Some(suggestion) = err.suggestion() {
            eprintln!("Suggestion: {}", suggestion);
        }

        let code = match err.severity() {
            ErrorSeverity::Warning => 0,
            ErrorSeverity::Error => 1,
            ErrorSeverity::Critical => 2,
        };
        std::process::exit(code);
    }
}
