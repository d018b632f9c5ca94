//! sbts session protocol definitions
// (c) 2026 sbts contributors
//!
//! The session protocol operates over one bidirectional byte stream, plain
//! TCP or TLS. Exactly one exchange happens per connection:
//!
//! * C ➡️ S : [Request] frame naming one remote file.
//! * S ➡️ C : one signed varint, classified as a [`ResponseHeader`].
//! * S ➡️ C : iff the header was non-negative, exactly that many bytes of
//!   file content. Then the connection is done.
//!
//! There is no provision for a second request on the same connection.

use std::fmt::Display;

use super::wire;

/// The protocol version this client speaks, sent in every request.
pub const PROTOCOL_VERSION: u64 = 0;

/// A request for one remote file.
///
/// The path is an arbitrary byte sequence; the server is authoritative on
/// what constitutes a valid identifier. Zero length is well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Remote file path, not null-terminated (it is length-prefixed on the wire)
    pub path: Vec<u8>,
}

impl Request {
    /// Constructor
    pub fn new(path: impl Into<Vec<u8>>) -> Self {
        Self { path: path.into() }
    }

    /// Encodes the request frame:
    /// `uvarint(version) || uvarint(len(path)) || path bytes`.
    #[must_use]
    pub fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.path.len() + 2 * wire::MAX_VARINT_LEN);
        wire::encode_uint(PROTOCOL_VERSION, &mut out);
        wire::encode_uint(self.path.len() as u64, &mut out);
        out.extend_from_slice(&self.path);
        out
    }
}

/// Machine-readable error statuses a server may answer with.
///
/// These are distinct from transport failures: the exchange completed at the
/// protocol level, the server declined to serve the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Status {
    /// Header value -1
    #[error("server reported that the file does not exist")]
    FileNotFound,
    /// Header value -2
    #[error("server reported that this client's protocol version is incompatible")]
    ClientIncompatible,
    /// Any other negative header value
    #[error("server reported an unrecognised error (code {0})")]
    Unknown(i64),
}

/// Classified response header.
///
/// The single signed integer the server answers with is a discriminated
/// value; this enum is the one place where the mapping lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseHeader {
    /// Non-negative header: the exact byte length of the body that follows
    Success(u64),
    /// -1
    FileNotFound,
    /// -2
    ClientIncompatible,
    /// Negative but not otherwise recognised
    Unknown(i64),
}

impl From<i64> for ResponseHeader {
    #[allow(clippy::cast_sign_loss)] // non-negative by the match arm
    fn from(raw: i64) -> Self {
        match raw {
            n if n >= 0 => Self::Success(n as u64),
            -1 => Self::FileNotFound,
            -2 => Self::ClientIncompatible,
            n => Self::Unknown(n),
        }
    }
}

impl ResponseHeader {
    /// Collapses the classification into the body length or the protocol error.
    pub fn into_result(self) -> Result<u64, Status> {
        match self {
            Self::Success(len) => Ok(len),
            Self::FileNotFound => Err(Status::FileNotFound),
            Self::ClientIncompatible => Err(Status::ClientIncompatible),
            Self::Unknown(code) => Err(Status::Unknown(code)),
        }
    }
}

impl Display for ResponseHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success(len) => write!(f, "success ({len} bytes)"),
            Self::FileNotFound => write!(f, "file not found"),
            Self::ClientIncompatible => write!(f, "client incompatible"),
            Self::Unknown(code) => write!(f, "unknown server error {code}"),
        }
    }
}
