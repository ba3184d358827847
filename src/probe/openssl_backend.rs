use super::{Handshaker, Offer};
use crate::model::{ProbeOutcome, ProtocolVersion, ScanTarget};
use async_trait::async_trait;
use openssl::ssl::{ErrorCode, SslConnector, SslMethod, SslVerifyMode, SslVersion};
use std::pin::Pin;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_openssl::SslStream;

/// Handshakes through the system OpenSSL, pinned to one version and suite.
///
/// Modern OpenSSL builds cannot speak SSLv2 or SSLv3, and many drop legacy
/// suites entirely. Such offers are reported as unsupported and never sent.
pub struct OpensslHandshaker;

fn ssl_version(version: ProtocolVersion) -> Option<SslVersion> {
    match version {
        ProtocolVersion::SSLv2 | ProtocolVersion::SSLv3 => None,
        ProtocolVersion::TLS1_0 => Some(SslVersion::TLS1),
        ProtocolVersion::TLS1_1 => Some(SslVersion::TLS1_1),
        ProtocolVersion::TLS1_2 => Some(SslVersion::TLS1_2),
        ProtocolVersion::TLS1_3 => Some(SslVersion::TLS1_3),
    }
}

fn connector(offer: &Offer) -> Result<Option<SslConnector>, openssl::error::ErrorStack> {
    let Some(pinned) = ssl_version(offer.version()) else {
        return Ok(None);
    };
    let mut builder = SslConnector::builder(SslMethod::tls())?;
    builder.set_verify(SslVerifyMode::NONE);
    builder.set_min_proto_version(Some(pinned))?;
    builder.set_max_proto_version(Some(pinned))?;
    match offer {
        Offer::Protocol(ProtocolVersion::TLS1_3) => {}
        Offer::Protocol(_) => builder.set_cipher_list("ALL:COMPLEMENTOFALL:@SECLEVEL=0")?,
        Offer::Cipher { suite, .. } if suite.tls13 => builder.set_ciphersuites(suite.openssl_name)?,
        Offer::Cipher { suite, .. } => {
            builder.set_cipher_list(&format!("{}:@SECLEVEL=0", suite.openssl_name))?
        }
    }
    Ok(Some(builder.build()))
}

#[async_trait]
impl Handshaker for OpensslHandshaker {
    fn name(&self) -> &'static str {
        "openssl"
    }

    fn supports(&self, offer: &Offer) -> bool {
        matches!(connector(offer), Ok(Some(_)))
    }

    async fn attempt(&self, target: &ScanTarget, offer: &Offer, limit: Duration) -> ProbeOutcome {
        let connector = match connector(offer) {
            Ok(Some(connector)) => connector,
            Ok(None) => return ProbeOutcome::Error("not supported by backend".into()),
            // the local library refuses this suite outright
            Err(err) => return ProbeOutcome::Error(format!("cannot configure OpenSSL: {err}")),
        };

        let connect = TcpStream::connect((target.connect_host(), target.port));
        let stream = match timeout(limit, connect).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(_)) | Err(_) => return ProbeOutcome::ConnectionRefused,
        };

        let sni = target.sni_host().unwrap_or(target.connect_host());
        let ssl = match connector.configure().and_then(|cfg| {
            cfg.verify_hostname(false)
                .use_server_name_indication(target.sni_host().is_some())
                .into_ssl(sni)
        }) {
            Ok(ssl) => ssl,
            Err(err) => return ProbeOutcome::Error(format!("cannot configure OpenSSL: {err}")),
        };
        let mut tls = match SslStream::new(ssl, stream) {
            Ok(tls) => tls,
            Err(err) => return ProbeOutcome::Error(err.to_string()),
        };

        let outcome = match timeout(limit, Pin::new(&mut tls).connect()).await {
            Err(_) => ProbeOutcome::Timeout,
            Ok(Ok(())) => {
                let session = tls.ssl();
                let version_ok = session.version2() == ssl_version(offer.version());
                let suite_ok = match offer {
                    Offer::Protocol(_) => true,
                    Offer::Cipher { suite, .. } => session
                        .current_cipher()
                        .map(|c| c.name() == suite.openssl_name || c.name() == suite.name)
                        .unwrap_or(false),
                };
                if version_ok && suite_ok {
                    ProbeOutcome::Negotiated
                } else {
                    ProbeOutcome::Rejected
                }
            }
            Ok(Err(err)) => {
                let code = err.code();
                // SYSCALL without an io error is an EOF mid-handshake
                if code == ErrorCode::SSL
                    || code == ErrorCode::ZERO_RETURN
                    || (code == ErrorCode::SYSCALL && err.io_error().is_none())
                {
                    ProbeOutcome::Rejected
                } else {
                    ProbeOutcome::Error(err.to_string())
                }
            }
        };
        let _ = tls.get_mut().shutdown().await;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher;

    #[test]
    fn legacy_versions_are_not_attempted() {
        let handshaker = OpensslHandshaker;
        assert!(!handshaker.supports(&Offer::Protocol(ProtocolVersion::SSLv2)));
        assert!(!handshaker.supports(&Offer::Protocol(ProtocolVersion::SSLv3)));
        assert!(handshaker.supports(&Offer::Protocol(ProtocolVersion::TLS1_2)));
        assert!(handshaker.supports(&Offer::Protocol(ProtocolVersion::TLS1_3)));
    }

    #[test]
    fn suites_are_checked_against_the_local_library() {
        let handshaker = OpensslHandshaker;
        let gcm = *cipher::lookup("TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256").unwrap();
        let aes13 = *cipher::lookup("TLS_AES_128_GCM_SHA256").unwrap();
        assert!(handshaker.supports(&Offer::Cipher {
            suite: gcm,
            version: ProtocolVersion::TLS1_2
        }));
        assert!(handshaker.supports(&Offer::Cipher {
            suite: aes13,
            version: ProtocolVersion::TLS1_3
        }));
        assert!(!handshaker.supports(&Offer::Cipher {
            suite: gcm,
            version: ProtocolVersion::SSLv3
        }));
    }

    #[tokio::test]
    async fn unsupported_offer_is_an_error_if_forced() {
        let outcome = OpensslHandshaker
            .attempt(
                &ScanTarget::new("127.0.0.1", 9),
                &Offer::Protocol(ProtocolVersion::SSLv3),
                Duration::from_millis(100),
            )
            .await;
        assert_eq!(outcome, ProbeOutcome::Error("not supported by backend".into()));
    }
}
