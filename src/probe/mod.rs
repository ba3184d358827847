mod hello;
#[cfg(feature = "openssl-backend")]
mod openssl_backend;
mod raw;
mod record;
mod server_hello;

pub use hello::{sslv2_client_hello, ClientHelloBuilder};
#[cfg(feature = "openssl-backend")]
pub use openssl_backend::OpensslHandshaker;
pub use raw::RawHandshaker;
pub use record::{FlightError, RecordReader};
pub use server_hello::{classify, ServerFlight, ServerHello};

use crate::cipher::CipherSuite;
use crate::model::{Backend, Dimension, ProbeConfig, ProbeOutcome, ProbeResult, ProtocolVersion, ScanTarget};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// What a single handshake offers the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// Only this version, with every catalog suite valid for it.
    Protocol(ProtocolVersion),
    /// Only this suite, pinned to one version.
    Cipher {
        suite: CipherSuite,
        version: ProtocolVersion,
    },
}

impl Offer {
    pub fn dimension(&self) -> Dimension {
        match self {
            Offer::Protocol(version) => Dimension::Protocol(*version),
            Offer::Cipher { suite, .. } => Dimension::Cipher(*suite),
        }
    }

    pub fn version(&self) -> ProtocolVersion {
        match self {
            Offer::Protocol(version) => *version,
            Offer::Cipher { version, .. } => *version,
        }
    }
}

/// One connection, one hello, one classified answer.
#[async_trait]
pub trait Handshaker: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this backend can put `offer` on the wire at all. Offers it
    /// cannot build say nothing about the server and are never dispatched.
    fn supports(&self, _offer: &Offer) -> bool {
        true
    }

    async fn attempt(&self, target: &ScanTarget, offer: &Offer, timeout: Duration) -> ProbeOutcome;
}

/// Capability interface the orchestrator drives.
#[async_trait]
pub trait HandshakeProber: Send + Sync {
    fn supports(&self, _offer: &Offer) -> bool {
        true
    }

    async fn probe_protocol(
        &self,
        target: &ScanTarget,
        version: ProtocolVersion,
        timeout: Duration,
    ) -> ProbeResult;

    async fn probe_cipher(
        &self,
        target: &ScanTarget,
        suite: &CipherSuite,
        version: ProtocolVersion,
        timeout: Duration,
    ) -> ProbeResult;
}

/// Wraps a backend with the retry policy: only timeouts are retried.
pub struct Prober<H> {
    handshaker: H,
    retries: u32,
}

impl<H: Handshaker> Prober<H> {
    pub fn new(handshaker: H, retries: u32) -> Self {
        Self { handshaker, retries }
    }

    async fn run(&self, target: &ScanTarget, offer: Offer, timeout: Duration) -> ProbeResult {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let outcome = self.handshaker.attempt(target, &offer, timeout).await;
            debug!(
                backend = self.handshaker.name(),
                %target,
                dimension = %offer.dimension(),
                attempt = attempts,
                %outcome,
                "probe attempt"
            );
            if outcome != ProbeOutcome::Timeout || attempts > self.retries {
                return ProbeResult::new(target.clone(), offer.dimension(), outcome, attempts);
            }
        }
    }
}

#[async_trait]
impl<H: Handshaker> HandshakeProber for Prober<H> {
    fn supports(&self, offer: &Offer) -> bool {
        self.handshaker.supports(offer)
    }

    async fn probe_protocol(
        &self,
        target: &ScanTarget,
        version: ProtocolVersion,
        timeout: Duration,
    ) -> ProbeResult {
        self.run(target, Offer::Protocol(version), timeout).await
    }

    async fn probe_cipher(
        &self,
        target: &ScanTarget,
        suite: &CipherSuite,
        version: ProtocolVersion,
        timeout: Duration,
    ) -> ProbeResult {
        let offer = Offer::Cipher {
            suite: *suite,
            version,
        };
        self.run(target, offer, timeout).await
    }
}

/// Prober for the configured backend.
pub fn build(cfg: &ProbeConfig) -> Arc<dyn HandshakeProber> {
    match cfg.backend {
        Backend::Raw => Arc::new(Prober::new(RawHandshaker::default(), cfg.retries)),
        #[cfg(feature = "openssl-backend")]
        Backend::Openssl => Arc::new(Prober::new(OpensslHandshaker, cfg.retries)),
    }
}
