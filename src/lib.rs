// (c) 2026 sbts contributors

//! Streaming client for the sbts file retrieval protocol.
//!
//! ## Overview
//!
//! sbts is about the smallest useful file-transfer protocol: the client
//! opens a connection (plain TCP or TLS), sends one framed request naming
//! one remote file, and receives either a framed error code or a framed
//! length followed by exactly that many bytes of file content. One request
//! per connection; the content is streamed, never buffered whole.
//!
//! * [Wire protocol](protocol)
//! * [Exchange engine and body stream](client)
//!
//! ## Library use
//!
//! ```no_run
//! use std::io::Read;
//!
//! # fn main() -> anyhow::Result<()> {
//! let remote: sbts::Locator = "sbts://server:7878/some/file".parse()?;
//! let mut body = sbts::fetch(&remote, &sbts::TransportSettings::default())?;
//! let mut contents = Vec::new();
//! body.read_to_end(&mut contents)?;
//! // dropping `body` closes the connection
//! # Ok(())
//! # }
//! ```
//!
//! The engine is strictly synchronous: one blocking connection per
//! [`fetch`], no internal concurrency, no retries, no timeouts of its own
//! (dial timeouts live in [`TransportSettings`]).
//!
//! ## Command line use
//!
//! ```text
//! sbts get sbts://server:7878/file            # plain, to stdout
//! sbts get sbtss://server:7878/file -o file   # TLS, to a local file
//! ```

pub(crate) mod cli;
pub use cli::cli as main;
pub use cli::styles;

pub mod client;
pub use client::{fetch, ExchangeError, FileBody, Locator};

pub mod protocol;
pub mod transport;
pub use transport::{Connection, TransportSettings};

pub mod util;
