//! `medsupply` binary entry point; all logic lives in `medsupply::app`.

use std::process::ExitCode;

fn main() -> ExitCode {
    match medsupply::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
