//! Reeve CLI binary entry point.

use std::process::ExitCode;

use reeve_cli::cli::{self, Failure};
use reeve_cli::ui::output;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            Failure::classify(&err).into()
        }
    }
}
