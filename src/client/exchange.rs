//! The request/response exchange engine
// (c) 2026 sbts contributors
//!
//! [`exchange`] drives exactly one request/response exchange over a stream it
//! takes ownership of. On any failure path the stream is dropped (closing the
//! connection) before the error is returned; on success, ownership of the
//! still-open connection transfers into the returned [`FileBody`], whose drop
//! closes it. There is no path on which the connection leaks or is closed
//! twice.
//!
//! Per exchange: `Connecting → RequestSent → AwaitingHeader → {Streaming |
//! Failed}`; `Streaming` ends when the `FileBody` is dropped.

use std::io::{self, Read, Write};

use tracing::trace;

use crate::protocol::session::{Request, ResponseHeader, Status};
use crate::protocol::wire::{self, FrameError};

/// Everything that can go wrong with a single exchange.
///
/// All variants are fatal to the exchange and the connection is closed by
/// the time the error is returned. The engine itself never retries and never
/// imposes a timeout; both are the caller's or the transport's business.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// Dial, write, or read failure, including mid-body truncation
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),
    /// TLS session establishment or record-layer failure
    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),
    /// Malformed varint encoding in the response header; the stream can no
    /// longer be trusted
    #[error("protocol framing error: {0}")]
    Frame(FrameError),
    /// The server answered, but declined to serve the file
    #[error(transparent)]
    Remote(#[from] Status),
}

impl From<FrameError> for ExchangeError {
    fn from(e: FrameError) -> Self {
        // A transport failure mid-decode is a transport error; only a
        // malformed encoding is a framing error.
        match e {
            FrameError::Io(io) => Self::Transport(io),
            other => Self::Frame(other),
        }
    }
}

/// Performs one exchange: writes the request frame, reads and classifies the
/// response header, and hands back the body as a bounded stream.
///
/// Generic over the stream so that tests can drive it with an in-memory
/// fake; real callers go through [`fetch`](crate::client::fetch).
pub fn exchange<S: Read + Write>(mut stream: S, path: &[u8]) -> Result<FileBody<S>, ExchangeError> {
    let frame = Request::new(path).to_wire();
    trace!("sending request, {} byte frame", frame.len());
    stream.write_all(&frame)?;
    stream.flush()?;

    trace!("awaiting response header");
    let header = ResponseHeader::from(wire::decode_int(&mut stream)?);
    trace!("response header: {header}");
    let declared = header.into_result()?;

    Ok(FileBody {
        stream,
        declared,
        remaining: declared,
    })
}

/// The response body: an ordered byte sequence of exactly the declared
/// length, read lazily from the connection it owns.
///
/// The declared length is a hard ceiling enforced independently of whatever
/// the underlying connection might still deliver: after the declared number
/// of bytes this reader reports end-of-stream, full stop. Conversely, if the
/// peer closes the connection early, the shortfall surfaces as an
/// [`io::ErrorKind::UnexpectedEof`] error, never as a silent short read.
///
/// Dropping the `FileBody` closes the connection.
pub struct FileBody<S> {
    stream: S,
    declared: u64,
    remaining: u64,
}

impl<S> FileBody<S> {
    /// The body length the server declared in its response header.
    #[must_use]
    pub fn declared_len(&self) -> u64 {
        self.declared
    }

    /// Bytes not yet read out of this body.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl<S: Read> Read for FileBody<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 || buf.is_empty() {
            return Ok(0);
        }
        let want = usize::try_from(self.remaining)
            .unwrap_or(usize::MAX)
            .min(buf.len());
        match self.stream.read(&mut buf[..want]) {
            Ok(0) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "connection closed with {} body bytes outstanding",
                    self.remaining
                ),
            )),
            Ok(n) => {
                self.remaining -= n as u64;
                Ok(n)
            }
            Err(e) => Err(e),
        }
    }
}

impl<S> std::fmt::Debug for FileBody<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileBody")
            .field("declared", &self.declared)
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}
