//! Connection establishment: plain TCP and TLS
// (c) 2026 sbts contributors
//!
//! The protocol engine only needs something that yields a bidirectional byte
//! stream; this module provides the two kinds we support. I/O is synchronous
//! and blocking throughout: one connection per exchange, no reuse.

use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use rustls::{ClientConnection, StreamOwned};
use rustls_pki_types::ServerName;
use tracing::trace;

use crate::client::ExchangeError;

/// How to establish connections.
///
/// Constructed from parsed CLI arguments and passed by reference; replaces
/// the process-wide flag globals of older clients.
#[derive(Debug, Clone, Default)]
pub struct TransportSettings {
    /// If present, wrap the connection in TLS with this configuration.
    pub tls: Option<Arc<rustls::ClientConfig>>,
    /// Optional dial timeout. The engine itself imposes no timeout at all;
    /// this is the whole of the connection-establishment policy.
    pub connect_timeout: Option<Duration>,
}

/// A live connection to a server, plain or TLS.
///
/// Closed when dropped. The TLS variant runs its handshake lazily on first
/// use, so a handshake failure surfaces from the engine's first write.
#[derive(Debug)]
pub enum Connection {
    /// Plain TCP
    Plain(TcpStream),
    /// TLS over TCP
    Tls(Box<StreamOwned<ClientConnection, TcpStream>>),
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Connection::Plain(s) => s.read(buf),
            Connection::Tls(s) => s.read(buf),
        }
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Connection::Plain(s) => s.write(buf),
            Connection::Tls(s) => s.write(buf),
        }
    }
    fn flush(&mut self) -> io::Result<()> {
        match self {
            Connection::Plain(s) => s.flush(),
            Connection::Tls(s) => s.flush(),
        }
    }
}

/// Dials `host:port` per the settings.
///
/// Failures leave no partial state behind; any half-open socket is dropped
/// before the error is returned.
pub fn dial(
    host: &str,
    port: u16,
    settings: &TransportSettings,
) -> Result<Connection, ExchangeError> {
    trace!("dialling {host}:{port}");
    let tcp = connect(host, port, settings.connect_timeout)?;
    let Some(tls_config) = &settings.tls else {
        return Ok(Connection::Plain(tcp));
    };

    trace!("establishing TLS session with {host}");
    let name = ServerName::try_from(host.to_string())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let session = ClientConnection::new(Arc::clone(tls_config), name)?;
    Ok(Connection::Tls(Box::new(StreamOwned::new(session, tcp))))
}

fn connect(host: &str, port: u16, timeout: Option<Duration>) -> io::Result<TcpStream> {
    let Some(timeout) = timeout else {
        return TcpStream::connect((host, port));
    };
    // connect_timeout wants a resolved address, so try them all in order
    // the way TcpStream::connect would.
    let mut last_error = None;
    for addr in (host, port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_error = Some(e),
        }
    }
    Err(last_error.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{host}:{port} did not resolve to any address"),
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::{dial, TransportSettings};
    use crate::client::ExchangeError;

    #[test]
    fn dial_refused_is_a_transport_error() {
        // grab a free port, then release it so nothing is listening there
        let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let e = dial("127.0.0.1", port, &TransportSettings::default()).unwrap_err();
        assert!(matches!(e, ExchangeError::Transport(_)), "{e:?}");
    }

    #[test]
    fn plain_dial_succeeds() {
        let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let port = listener.local_addr().unwrap().port();
        assert!(dial("127.0.0.1", port, &TransportSettings::default()).is_ok());
    }

    #[test]
    fn dial_with_timeout_succeeds() {
        let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let port = listener.local_addr().unwrap().port();
        let settings = TransportSettings {
            connect_timeout: Some(std::time::Duration::from_secs(5)),
            ..TransportSettings::default()
        };
        assert!(dial("127.0.0.1", port, &settings).is_ok());
    }
}
