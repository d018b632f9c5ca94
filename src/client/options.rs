//! Options specific to the get command
// (c) 2026 sbts contributors

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser, Clone, Default)]
/// Options for one file retrieval, provided on the command line.
pub struct Parameters {
    /// The file to retrieve.
    ///
    /// Specify as `sbts://host:port/path` for a plain connection or
    /// `sbtss://host:port/path` to use TLS.
    #[arg(value_name = "URL")]
    pub url: String,

    /// File location for the certificate the client should present
    #[arg(
        short = 't',
        long,
        value_name("FILE"),
        requires("key"),
        help_heading("TLS")
    )]
    pub cert: Option<PathBuf>,

    /// File location for the certificate key the client should present
    #[arg(
        short = 'k',
        long,
        value_name("FILE"),
        requires("cert"),
        help_heading("TLS")
    )]
    pub key: Option<PathBuf>,

    /// File location for an override root CA certificate
    ///
    /// This may be a single certificate (PEM or DER) or a directory of them.
    #[arg(short = 'a', long, value_name("FILE_OR_DIR"), help_heading("TLS"))]
    pub ca: Option<PathBuf>,

    /// Whether to skip authentication of the remote end
    ///
    /// The connection is still encrypted, but anybody could be on the other
    /// end of it.
    #[arg(short = 's', long, action, help_heading("TLS"))]
    pub skip_verify: bool,

    /// Write the retrieved file here instead of to standard output
    #[arg(short = 'o', long, value_name("FILE"), help_heading("Output"))]
    pub output: Option<PathBuf>,

    /// Give up dialling after this many seconds
    ///
    /// By default, only the operating system limits the dial. There is
    /// deliberately no timeout on the transfer itself.
    #[arg(long, value_name("SECONDS"))]
    pub connect_timeout: Option<u64>,
}
