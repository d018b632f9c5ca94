//! sbts utility - main entrypoint
// (c) 2026 sbts contributors

use sbts::styles::{ERROR, RESET};

fn main() -> std::process::ExitCode {
    match sbts::main() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            if sbts::util::tracing_is_initialised() {
                tracing::error!("{e:#}");
            } else {
                anstream::eprintln!("{ERROR}Error:{RESET} {e:#}");
            }
            std::process::ExitCode::FAILURE
        }
    }
}
