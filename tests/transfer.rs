//! End-to-end transfers against a scripted server on a loopback socket
// (c) 2026 sbts contributors

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread::JoinHandle;

use pretty_assertions::assert_eq;

use sbts::protocol::session::Status;
use sbts::protocol::wire;
use sbts::{fetch, ExchangeError, Locator, TransportSettings};

/// Reads one request frame off the stream and returns the path bytes.
fn read_request<S: Read>(stream: &mut S) -> Vec<u8> {
    let version = wire::decode_uint(stream).unwrap();
    assert_eq!(version, 0, "unexpected protocol version");
    let len = wire::decode_uint(stream).unwrap();
    let mut path = vec![0u8; usize::try_from(len).unwrap()];
    stream.read_exact(&mut path).unwrap();
    path
}

fn response(header: i64, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    wire::encode_int(header, &mut out);
    out.extend_from_slice(body);
    out
}

/// One-shot plain-TCP server; returns the request path it saw.
fn plain_server(reply: Vec<u8>) -> (u16, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let path = read_request(&mut stream);
        stream.write_all(&reply).unwrap();
        path
    });
    (port, handle)
}

#[test]
fn plain_round_trip() {
    let (port, server) = plain_server(response(13, b"hello, world!"));
    let remote: Locator = format!("sbts://127.0.0.1:{port}/etc/hosts").parse().unwrap();

    let mut body = fetch(&remote, &TransportSettings::default()).unwrap();
    assert_eq!(body.declared_len(), 13);
    let mut contents = Vec::new();
    body.read_to_end(&mut contents).unwrap();
    assert_eq!(contents, b"hello, world!");

    assert_eq!(server.join().unwrap(), b"/etc/hosts");
}

#[test]
fn plain_file_not_found() {
    let (port, server) = plain_server(response(-1, b""));
    let remote: Locator = format!("sbts://127.0.0.1:{port}/missing").parse().unwrap();

    let e = fetch(&remote, &TransportSettings::default()).unwrap_err();
    assert!(
        matches!(e, ExchangeError::Remote(Status::FileNotFound)),
        "{e:?}"
    );
    assert_eq!(server.join().unwrap(), b"/missing");
}

#[test]
fn peer_closing_early_surfaces_as_truncation() {
    // declares 100 bytes, delivers 10, hangs up
    let (port, _server) = plain_server(response(100, b"0123456789"));
    let remote: Locator = format!("sbts://127.0.0.1:{port}/big").parse().unwrap();

    let mut body = fetch(&remote, &TransportSettings::default()).unwrap();
    let mut delivered = [0u8; 10];
    body.read_exact(&mut delivered).unwrap();
    assert_eq!(&delivered, b"0123456789", "delivered bytes remain readable");
    let mut rest = Vec::new();
    let e = body.read_to_end(&mut rest).unwrap_err();
    assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof);
}

/// One-shot TLS server with a freshly generated self-signed certificate.
/// Returns the certificate (PEM) for the client to trust.
fn tls_server(reply: Vec<u8>) -> (u16, String, JoinHandle<Vec<u8>>) {
    let certified = rcgen::generate_simple_self_signed(vec!["127.0.0.1".to_string()]).unwrap();
    let cert_pem = certified.cert.pem();
    let cert_der = certified.cert.der().clone();
    let key_der = rustls_pki_types::PrivateKeyDer::Pkcs8(
        certified.key_pair.serialize_der().into(),
    );

    let server_config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(vec![cert_der], key_der)
        .unwrap();

    let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = std::thread::spawn(move || {
        let (tcp, _) = listener.accept().unwrap();
        let session = rustls::ServerConnection::new(Arc::new(server_config)).unwrap();
        let mut stream: rustls::StreamOwned<rustls::ServerConnection, TcpStream> =
            rustls::StreamOwned::new(session, tcp);
        let path = read_request(&mut stream);
        stream.write_all(&reply).unwrap();
        stream.flush().unwrap();
        stream.conn.send_close_notify();
        let _ = stream.flush();
        path
    });
    (port, cert_pem, handle)
}

fn trusting(cert_pem: &str) -> TransportSettings {
    use rustls_pki_types::pem::PemObject as _;
    let mut roots = rustls::RootCertStore::empty();
    for cert in rustls_pki_types::CertificateDer::pem_slice_iter(cert_pem.as_bytes()) {
        roots.add(cert.unwrap()).unwrap();
    }
    let config = rustls::ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    TransportSettings {
        tls: Some(Arc::new(config)),
        ..TransportSettings::default()
    }
}

#[test]
fn tls_round_trip() {
    let (port, cert_pem, server) = tls_server(response(6, b"secret"));
    let remote: Locator = format!("sbtss://127.0.0.1:{port}/vault").parse().unwrap();

    let mut body = fetch(&remote, &trusting(&cert_pem)).unwrap();
    let mut contents = Vec::new();
    body.read_to_end(&mut contents).unwrap();
    assert_eq!(contents, b"secret");

    assert_eq!(server.join().unwrap(), b"/vault");
}

#[test]
fn tls_untrusted_server_is_rejected() {
    let (port, _cert_pem, _server) = tls_server(response(6, b"secret"));
    let remote: Locator = format!("sbtss://127.0.0.1:{port}/vault").parse().unwrap();

    // a client trusting a *different* certificate must refuse the handshake
    let other = rcgen::generate_simple_self_signed(vec!["127.0.0.1".to_string()]).unwrap();
    let e = fetch(&remote, &trusting(&other.cert.pem())).unwrap_err();
    assert!(
        matches!(e, ExchangeError::Transport(_) | ExchangeError::Tls(_)),
        "{e:?}"
    );
}
