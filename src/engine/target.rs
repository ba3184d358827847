use super::rate::RateLimiter;
use crate::cipher::CipherSuite;
use crate::model::{ProbeOutcome, ProbeResult, ProtocolVersion, ScanLimits, ScanTarget};
use crate::probe::{HandshakeProber, Offer};
use crate::report::{CapabilityReport, ReportBuilder};
use futures::stream::{self, StreamExt};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Everything a target task needs, shared read-only across tasks.
pub(super) struct TargetContext {
    pub prober: Arc<dyn HandshakeProber>,
    pub protocols: Vec<ProtocolVersion>,
    pub ciphers: Vec<CipherSuite>,
    pub limits: ScanLimits,
    pub probe_timeout: Duration,
    pub force_tls: bool,
    pub limiter: Option<RateLimiter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Halt {
    Refused,
    ErrorThreshold,
}

struct Dispatcher<'a> {
    ctx: &'a TargetContext,
    target: &'a ScanTarget,
    /// Scan-wide deadline.
    cancel: &'a CancellationToken,
    /// Stops dispatch for this target only; child of `cancel`.
    stop: CancellationToken,
}

/// Per-target aggregation, owned by the target's task.
struct Tally {
    report: ReportBuilder,
    errors: usize,
    halt: Option<Halt>,
}

pub(super) async fn scan_target(
    ctx: &TargetContext,
    target: ScanTarget,
    cancel: &CancellationToken,
) -> CapabilityReport {
    let dispatcher = Dispatcher {
        ctx,
        target: &target,
        cancel,
        stop: cancel.child_token(),
    };
    let mut tally = Tally {
        report: ReportBuilder::new(target.clone()),
        errors: 0,
        halt: None,
    };

    let protocols = ctx.protocols.iter().map(|v| Offer::Protocol(*v)).collect();
    let protocols = attemptable(ctx, &target, protocols);
    let Some((first, rest)) = protocols.split_first() else {
        return tally.report.build();
    };

    // The first probe tells us whether anything listens at all.
    if let Some(result) = dispatcher.dispatch(*first).await {
        if result.outcome == ProbeOutcome::ConnectionRefused {
            tally.report.record(result);
            tally.report.mark_unreachable();
            info!(%target, "target unreachable");
            return tally.report.build();
        }
        tally.record(&dispatcher, result);
    }

    dispatcher.batch(&mut tally, rest.to_vec()).await;

    if tally.halt.is_none() && (tally.report.has_protocols() || ctx.force_tls) {
        let offers = cipher_offers(&ctx.ciphers, tally.report.negotiated(), ctx.force_tls);
        let offers = attemptable(ctx, &target, offers);
        debug!(%target, ciphers = offers.len(), "probing cipher suites");
        dispatcher.batch(&mut tally, offers).await;
    }

    let report = tally.report.build();
    info!(
        %target,
        status = %report.status(),
        protocols = report.supported_protocols().len(),
        ciphers = report.supported_ciphers().len(),
        probes = report.probes_issued(),
        "target scanned"
    );
    report
}

/// Drops offers the backend cannot send. They would only come back as local
/// errors and eat into the target's error budget.
fn attemptable(ctx: &TargetContext, target: &ScanTarget, offers: Vec<Offer>) -> Vec<Offer> {
    let total = offers.len();
    let offers: Vec<Offer> = offers
        .into_iter()
        .filter(|offer| ctx.prober.supports(offer))
        .collect();
    if offers.len() < total {
        debug!(%target, skipped = total - offers.len(), "offers not supported by backend");
    }
    offers
}

impl Dispatcher<'_> {
    /// Runs one probe unless dispatch has stopped. Probes skipped because the
    /// deadline passed come back as `Cancelled`; probes still running when it
    /// passes resolve to `Timeout`.
    async fn dispatch(&self, offer: Offer) -> Option<ProbeResult> {
        let ctx = self.ctx;
        let target = self.target;
        if self.stop.is_cancelled() {
            return self.cancel.is_cancelled().then(|| {
                ProbeResult::new(target.clone(), offer.dimension(), ProbeOutcome::Cancelled, 0)
            });
        }

        let probe = async {
            if let Some(limiter) = &ctx.limiter {
                limiter.acquire().await;
            }
            match offer {
                Offer::Protocol(version) => {
                    ctx.prober
                        .probe_protocol(target, version, ctx.probe_timeout)
                        .await
                }
                Offer::Cipher { suite, version } => {
                    ctx.prober
                        .probe_cipher(target, &suite, version, ctx.probe_timeout)
                        .await
                }
            }
        };

        let result = tokio::select! {
            result = probe => result,
            _ = self.cancel.cancelled() => {
                ProbeResult::new(target.clone(), offer.dimension(), ProbeOutcome::Timeout, 1)
            }
        };
        Some(result)
    }

    /// Runs `offers` with at most `probes_per_target` in flight, folding each
    /// result into the tally as it completes.
    async fn batch(&self, tally: &mut Tally, offers: Vec<Offer>) {
        let width = self.ctx.limits.probes_per_target.max(1);
        let mut results = stream::iter(offers)
            .map(|offer| self.dispatch(offer))
            .buffer_unordered(width);
        while let Some(result) = results.next().await {
            if let Some(result) = result {
                tally.record(self, result);
            }
        }
    }
}

impl Tally {
    fn record(&mut self, dispatcher: &Dispatcher<'_>, result: ProbeResult) {
        match &result.outcome {
            ProbeOutcome::ConnectionRefused if self.halt.is_none() => {
                warn!(target = %dispatcher.target, dimension = %result.dimension, "connection refused mid-scan");
                self.halt = Some(Halt::Refused);
                dispatcher.stop.cancel();
            }
            ProbeOutcome::Error(reason) => {
                self.errors += 1;
                if self.errors > dispatcher.ctx.limits.error_threshold
                    && self.halt != Some(Halt::ErrorThreshold)
                {
                    warn!(target = %dispatcher.target, errors = self.errors, %reason, "error threshold exceeded");
                    self.halt = Some(Halt::ErrorThreshold);
                    self.report.mark_threshold_breached();
                    dispatcher.stop.cancel();
                }
            }
            _ => {}
        }
        self.report.record(result);
    }
}

/// Pins each catalog suite to the version it is probed at: TLS 1.3 suites at
/// TLS 1.3, the rest at the highest negotiated version from SSLv3 to TLS 1.2.
pub(super) fn cipher_offers(
    ciphers: &[CipherSuite],
    negotiated: &BTreeSet<ProtocolVersion>,
    force_tls: bool,
) -> Vec<Offer> {
    let tls13 = negotiated.contains(&ProtocolVersion::TLS1_3) || force_tls;
    let legacy = negotiated
        .iter()
        .rev()
        .copied()
        .find(|v| (ProtocolVersion::SSLv3..=ProtocolVersion::TLS1_2).contains(v))
        .or(force_tls.then_some(ProtocolVersion::TLS1_2));

    ciphers
        .iter()
        .filter_map(|suite| {
            let version = if suite.tls13 {
                tls13.then_some(ProtocolVersion::TLS1_3)
            } else {
                legacy.filter(|v| suite.usable_with(*v))
            };
            version.map(|version| Offer::Cipher {
                suite: *suite,
                version,
            })
        })
        .collect()
}
