//! TLS client configuration assembly
// (c) 2026 sbts contributors
//!
//! Turns the certificate-related CLI flags into a [`rustls::ClientConfig`]:
//! optional client certificate and key (PEM), optional override trust roots
//! (a PEM or DER file, or a directory of them), and the peer-verification
//! skip toggle. Nothing here touches the network.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::RootCertStore;
use rustls_pki_types::pem::PemObject as _;
use rustls_pki_types::{CertificateDer, PrivateKeyDer, ServerName, UnixTime};
use tracing::warn;

/// Assembles a TLS client configuration from file paths.
///
/// Giving a certificate without its key (or vice versa) is a usage error.
/// With `skip_verify` the server's certificate is accepted unexamined
/// (handshake signatures are still verified); any `ca` override is then
/// redundant and ignored with a warning.
pub(crate) fn client_config(
    cert: Option<&Path>,
    key: Option<&Path>,
    ca: Option<&Path>,
    skip_verify: bool,
) -> anyhow::Result<Arc<rustls::ClientConfig>> {
    let client_auth = match (cert, key) {
        (Some(cert), Some(key)) => Some(load_client_pair(cert, key)?),
        (Some(_), None) => anyhow::bail!("--cert was given without --key"),
        (None, Some(_)) => anyhow::bail!("--key was given without --cert"),
        (None, None) => None,
    };

    let builder = rustls::ClientConfig::builder();
    let builder = if skip_verify {
        if ca.is_some() {
            warn!("--ca has no effect when --skip-verify is given");
        }
        builder
            .dangerous()
            .with_custom_certificate_verifier(SkipServerVerification::new())
    } else {
        builder.with_root_certificates(load_roots(ca)?)
    };

    let config = match client_auth {
        Some((chain, key)) => builder
            .with_client_auth_cert(chain, key)
            .context("client certificate/key pair was not usable")?,
        None => builder.with_no_client_auth(),
    };
    Ok(Arc::new(config))
}

fn load_client_pair(
    cert: &Path,
    key: &Path,
) -> anyhow::Result<(Vec<CertificateDer<'static>>, PrivateKeyDer<'static>)> {
    let chain = CertificateDer::pem_file_iter(cert)
        .with_context(|| format!("reading client certificate {}", cert.display()))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("parsing client certificate {}", cert.display()))?;
    anyhow::ensure!(
        !chain.is_empty(),
        "no certificates found in {}",
        cert.display()
    );
    let key = PrivateKeyDer::from_pem_file(key)
        .with_context(|| format!("reading client key {}", key.display()))?;
    Ok((chain, key))
}

/// Builds the trust root set: the override CA location if one was given,
/// otherwise the bundled webpki roots.
fn load_roots(ca: Option<&Path>) -> anyhow::Result<RootCertStore> {
    let mut roots = RootCertStore::empty();
    let Some(ca) = ca else {
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        return Ok(roots);
    };

    if ca.is_dir() {
        for entry in
            fs::read_dir(ca).with_context(|| format!("opening CA directory {}", ca.display()))?
        {
            let path = entry?.path();
            if path.is_dir() {
                continue;
            }
            add_cert_file(&mut roots, &path)?;
        }
    } else {
        add_cert_file(&mut roots, ca)?;
    }
    anyhow::ensure!(!roots.is_empty(), "no CA certificates found in {}", ca.display());
    Ok(roots)
}

/// Adds the certificates from one file, PEM bundle or single DER cert.
fn add_cert_file(roots: &mut RootCertStore, path: &Path) -> anyhow::Result<()> {
    let contents =
        fs::read(path).with_context(|| format!("reading CA certificate {}", path.display()))?;
    if contents.windows(10).any(|w| w == b"-----BEGIN") {
        for cert in CertificateDer::pem_slice_iter(&contents) {
            let cert = cert.with_context(|| format!("parsing {}", path.display()))?;
            roots
                .add(cert)
                .with_context(|| format!("adding certificate from {}", path.display()))?;
        }
    } else {
        roots
            .add(CertificateDer::from(contents))
            .with_context(|| format!("adding certificate from {}", path.display()))?;
    }
    Ok(())
}

/// Accepts any server certificate. Handshake signatures are still verified,
/// so the session remains encrypted and bound to the presented key; what is
/// lost is any assurance of who the peer is.
#[derive(Debug)]
struct SkipServerVerification(CryptoProvider);

impl SkipServerVerification {
    fn new() -> Arc<Self> {
        Arc::new(Self(rustls::crypto::ring::default_provider()))
    }
}

impl ServerCertVerifier for SkipServerVerification {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &rustls::DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(
            message,
            cert,
            dss,
            &self.0.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &rustls::DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(
            message,
            cert,
            dss,
            &self.0.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}
