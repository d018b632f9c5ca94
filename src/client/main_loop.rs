//! Client main loop: resolve, dial, exchange, sink
// (c) 2026 sbts contributors

use std::fs::File;
use std::io;
use std::time::Duration;

use anyhow::Context as _;
use tracing::{debug, info, warn};

use super::exchange::{exchange, ExchangeError, FileBody};
use super::locator::Locator;
use super::options::Parameters;
use crate::transport::{dial, Connection, TransportSettings};
use crate::util::cert;

/// Retrieves one remote file: a fresh connection from dial to eventual
/// close, one exchange, no reuse.
///
/// On success the connection stays open, owned by the returned [`FileBody`];
/// dropping that closes it. On any error the connection is already closed.
pub fn fetch(
    remote: &Locator,
    settings: &TransportSettings,
) -> Result<FileBody<Connection>, ExchangeError> {
    let connection = dial(&remote.host, remote.port, settings)?;
    exchange(connection, remote.path.as_bytes())
}

/// Command-line driver: parses the locator, assembles the transport
/// settings from the flags, fetches, and copies the body to its sink.
pub(crate) fn client_main(params: &Parameters) -> anyhow::Result<()> {
    let remote: Locator = params.url.parse()?;
    let settings = transport_settings(&remote, params)?;

    let mut body = fetch(&remote, &settings).with_context(|| format!("retrieving {remote}"))?;
    debug!("server declared {} bytes", body.declared_len());

    // Any error up to here exits before a single body byte is written.
    let copied = match &params.output {
        Some(path) => {
            let mut sink = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            io::copy(&mut body, &mut sink)
        }
        None => io::copy(&mut body, &mut io::stdout().lock()),
    }
    .context("transfer interrupted")?;
    drop(body); // closes the connection

    info!("received {copied} bytes");
    Ok(())
}

fn transport_settings(remote: &Locator, params: &Parameters) -> anyhow::Result<TransportSettings> {
    let tls = if remote.tls {
        Some(cert::client_config(
            params.cert.as_deref(),
            params.key.as_deref(),
            params.ca.as_deref(),
            params.skip_verify,
        )?)
    } else {
        if params.cert.is_some() || params.key.is_some() || params.ca.is_some() || params.skip_verify
        {
            warn!("certificate options have no effect on a plain sbts:// URL");
        }
        None
    };
    Ok(TransportSettings {
        tls,
        connect_timeout: params.connect_timeout.map(Duration::from_secs),
    })
}
