//! Main CLI for sbts
// (c) 2026 sbts contributors

use clap::Parser as _;

use super::args::{CliArgs, Commands};
use crate::{client::client_main, util::setup_tracing};

/// Computes the trace level for a given set of [`CliArgs`]
fn trace_level(args: &CliArgs) -> &str {
    if args.debug {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "info"
    }
}

/// Main CLI entrypoint
///
/// Call this from `main`. It reads argv.
pub fn cli() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    setup_tracing(trace_level(&args))?; // to provoke error: set RUST_LOG=.

    match &args.command {
        Commands::Get(params) => client_main(params),
    }
}
