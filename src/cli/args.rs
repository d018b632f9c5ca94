//! Command-line argument definitions
// (c) 2026 sbts contributors

use clap::{Parser, Subcommand};

use crate::client::Parameters;

/// Top-level command line
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about,
    before_help = "Retrieve files from remote sbts servers",
    styles = super::styles::CLAP_STYLES
)]
pub(crate) struct CliArgs {
    /// Enable detailed debug output
    ///
    /// This has the same effect as setting `RUST_LOG=sbts=debug` in the
    /// environment. If present, `RUST_LOG` overrides this option.
    #[arg(short, long, action, help_heading("Output"), display_order(0))]
    pub(crate) debug: bool,

    /// Quiet mode
    ///
    /// Reports only errors
    #[arg(short, long, action, conflicts_with("debug"), help_heading("Output"))]
    pub(crate) quiet: bool,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Retrieves a file from a remote sbts server
    ///
    /// Takes a URL naming the server and the file. Example:
    ///
    ///    sbts get sbts://server:7878/file
    ///
    /// To use TLS:
    ///
    ///    sbts get sbtss://server:7878/file
    ///
    /// There are flags available to set up client and server certificates.
    #[command(verbatim_doc_comment)]
    Get(Parameters),
}

#[cfg(test)]
mod tests {
    use super::{CliArgs, Commands};
    use clap::Parser;

    #[test]
    fn get_subcommand() {
        let args = CliArgs::parse_from(["sbts", "get", "sbts://server:7878/file"]);
        let Commands::Get(params) = args.command;
        assert_eq!(params.url, "sbts://server:7878/file");
    }

    #[test]
    fn debug_and_quiet_conflict() {
        let e = CliArgs::try_parse_from(["sbts", "-d", "-q", "get", "sbts://s:1/f"]);
        assert!(e.is_err());
    }

    #[test]
    fn url_is_required() {
        let e = CliArgs::try_parse_from(["sbts", "get"]);
        assert!(e.is_err());
    }
}
