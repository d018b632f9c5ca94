//! Remote file locators
// (c) 2026 sbts contributors

use std::str::FromStr;

/// A remote file specified by the user as a URL-like locator.
///
/// `sbts://host:port/path` requests a plain connection,
/// `sbtss://host:port/path` a TLS-secured one. Schemes are matched
/// case-insensitively. A raw IPv6 address goes in brackets:
/// `sbtss://[::1]:7878/file`.
///
/// The port is mandatory; the protocol has no registered default. The path
/// is everything from the first `/` after the authority, leading slash
/// included, forwarded byte-for-byte (the server is authoritative on what a
/// valid identifier looks like). `sbts://host:port` alone yields an empty
/// path, which is well-formed; the server decides what to make of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    /// Whether to secure the connection with TLS
    pub tls: bool,
    /// Hostname or IP address, brackets stripped
    pub host: String,
    /// TCP port
    pub port: u16,
    /// Remote file path, leading slash included
    pub path: String,
}

impl FromStr for Locator {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, rest) = s
            .split_once("://")
            .ok_or_else(|| anyhow::anyhow!("{s} is not an sbts:// or sbtss:// URL"))?;
        let tls = match scheme.to_ascii_lowercase().as_str() {
            "sbts" => false,
            "sbtss" => true,
            other => anyhow::bail!("unknown scheme {other}: expected sbts or sbtss"),
        };

        let (authority, path) = match rest.find('/') {
            Some(i) => rest.split_at(i),
            None => (rest, ""),
        };

        let (host, port_str) = if let Some(bracketed) = authority.strip_prefix('[') {
            // raw IPv6 address: [1:2:3::4]:port
            let (host, after) = bracketed
                .split_once(']')
                .ok_or_else(|| anyhow::anyhow!("unterminated IPv6 address in {s}"))?;
            let port = after
                .strip_prefix(':')
                .ok_or_else(|| anyhow::anyhow!("{s} does not specify a port"))?;
            (host, port)
        } else {
            authority
                .rsplit_once(':')
                .ok_or_else(|| anyhow::anyhow!("{s} does not specify a port"))?
        };
        anyhow::ensure!(!host.is_empty(), "{s} does not specify a host");
        let port = port_str
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("{port_str} is not a valid port number"))?;

        Ok(Self {
            tls,
            host: host.to_owned(),
            port,
            path: path.to_owned(),
        })
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scheme = if self.tls { "sbtss" } else { "sbts" };
        if self.host.contains(':') {
            write!(f, "{scheme}://[{}]:{}{}", self.host, self.port, self.path)
        } else {
            write!(f, "{scheme}://{}:{}{}", self.host, self.port, self.path)
        }
    }
}
