use super::hello::{sslv2_client_hello, ClientHelloBuilder};
use super::record::{FlightError, RecordReader};
use super::server_hello::classify;
use super::{Handshaker, Offer};
use crate::cipher;
use crate::model::{ProbeOutcome, ProtocolVersion, ScanTarget};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Speaks just enough SSL/TLS on a plain socket to read the ServerHello.
#[derive(Debug, Default)]
pub struct RawHandshaker {
    reader: RecordReader,
}

impl RawHandshaker {
    fn client_hello(target: &ScanTarget, offer: &Offer) -> Vec<u8> {
        match offer {
            Offer::Protocol(ProtocolVersion::SSLv2) => sslv2_client_hello(),
            Offer::Protocol(version) => ClientHelloBuilder::new(*version)
                .ciphers(&cipher::codes_for(*version))
                .default_extensions(target.sni_host())
                .build(),
            Offer::Cipher { suite, version } => ClientHelloBuilder::new(*version)
                .ciphers(&[suite.code])
                .default_extensions(target.sni_host())
                .build(),
        }
    }

    async fn exchange(&self, stream: &mut TcpStream, hello: &[u8], offer: &Offer) -> ProbeOutcome {
        if let Err(err) = stream.write_all(hello).await {
            return ProbeOutcome::Error(format!("write failed: {err}"));
        }
        match self.reader.read_flight(stream).await {
            Ok(flight) => classify(offer, &flight),
            // servers that dislike the hello often just hang up
            Err(FlightError::Io(err)) if err.kind() == ErrorKind::UnexpectedEof => ProbeOutcome::Rejected,
            Err(err) => ProbeOutcome::Error(err.to_string()),
        }
    }
}

#[async_trait]
impl Handshaker for RawHandshaker {
    fn name(&self) -> &'static str {
        "raw"
    }

    async fn attempt(&self, target: &ScanTarget, offer: &Offer, limit: Duration) -> ProbeOutcome {
        if matches!(offer, Offer::Cipher { version: ProtocolVersion::SSLv2, .. }) {
            return ProbeOutcome::Error("SSLv2 cipher probes are not supported".into());
        }

        let connect = TcpStream::connect((target.connect_host(), target.port));
        let mut stream = match timeout(limit, connect).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(_)) | Err(_) => return ProbeOutcome::ConnectionRefused,
        };

        let hello = Self::client_hello(target, offer);
        let outcome = match timeout(limit, self.exchange(&mut stream, &hello, offer)).await {
            Ok(outcome) => outcome,
            Err(_) => ProbeOutcome::Timeout,
        };
        let _ = stream.shutdown().await;
        outcome
    }
}
