mod support;

use ssl_baseline::cipher;
use ssl_baseline::model::{ProbeConfig, ProbeOutcome, ProtocolVersion, ScanTarget};
use ssl_baseline::probe;
use std::time::Duration;
use support::Behaviour;

fn prober(timeout_ms: u64) -> (std::sync::Arc<dyn probe::HandshakeProber>, Duration) {
    let cfg = ProbeConfig {
        timeout: Duration::from_millis(timeout_ms),
        ..Default::default()
    };
    (probe::build(&cfg), cfg.timeout)
}

#[tokio::test]
async fn negotiates_tls12_and_its_suite() {
    let server = support::spawn(Behaviour::Tls12 { suite: 0xC02F }).await;
    let target = ScanTarget::new("127.0.0.1", server.port);
    let (prober, timeout) = prober(1000);

    let tls12 = prober.probe_protocol(&target, ProtocolVersion::TLS1_2, timeout).await;
    assert_eq!(tls12.outcome, ProbeOutcome::Negotiated);
    assert_eq!(tls12.attempts, 1);

    let tls13 = prober.probe_protocol(&target, ProtocolVersion::TLS1_3, timeout).await;
    assert_eq!(tls13.outcome, ProbeOutcome::Rejected);

    let ssl3 = prober.probe_protocol(&target, ProtocolVersion::SSLv3, timeout).await;
    assert_eq!(ssl3.outcome, ProbeOutcome::Rejected);

    let ssl2 = prober.probe_protocol(&target, ProtocolVersion::SSLv2, timeout).await;
    assert_eq!(ssl2.outcome, ProbeOutcome::Rejected);

    let chosen = cipher::lookup("TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256").unwrap();
    let other = cipher::lookup("TLS_RSA_WITH_AES_128_CBC_SHA").unwrap();
    let hit = prober.probe_cipher(&target, chosen, ProtocolVersion::TLS1_2, timeout).await;
    let miss = prober.probe_cipher(&target, other, ProtocolVersion::TLS1_2, timeout).await;
    assert_eq!(hit.outcome, ProbeOutcome::Negotiated);
    assert_eq!(miss.outcome, ProbeOutcome::Rejected);
}

#[tokio::test]
async fn timeout_is_retried_once() {
    let server = support::spawn(Behaviour::Silent).await;
    let target = ScanTarget::new("127.0.0.1", server.port);
    let (prober, timeout) = prober(200);

    let result = prober.probe_protocol(&target, ProtocolVersion::TLS1_2, timeout).await;
    assert_eq!(result.outcome, ProbeOutcome::Timeout);
    assert_eq!(result.attempts, 2);
    assert_eq!(server.accepted(), 2);
}

#[tokio::test]
async fn rejection_is_not_retried() {
    let server = support::spawn(Behaviour::Alert).await;
    let target = ScanTarget::new("127.0.0.1", server.port);
    let (prober, timeout) = prober(1000);

    let result = prober.probe_protocol(&target, ProtocolVersion::TLS1_2, timeout).await;
    assert_eq!(result.outcome, ProbeOutcome::Rejected);
    assert_eq!(result.attempts, 1);
    assert_eq!(server.accepted(), 1);
}

#[tokio::test]
async fn refused_connection_is_not_retried() {
    let port = support::closed_port().await;
    let target = ScanTarget::new("127.0.0.1", port);
    let (prober, timeout) = prober(500);

    let result = prober.probe_protocol(&target, ProtocolVersion::TLS1_2, timeout).await;
    assert_eq!(result.outcome, ProbeOutcome::ConnectionRefused);
    assert_eq!(result.attempts, 1);
}
