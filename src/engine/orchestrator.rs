use super::rate::RateLimiter;
use super::target::{scan_target, TargetContext};
use crate::cipher::CipherSuite;
use crate::model::{ProtocolVersion, ScanLimits, ScanTarget};
use crate::probe::HandshakeProber;
use crate::report::CapabilityReport;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// Fans probes out across targets, versions and suites within the limits.
pub struct Orchestrator {
    prober: Arc<dyn HandshakeProber>,
    limits: ScanLimits,
    probe_timeout: Duration,
    force_tls: bool,
}

impl Orchestrator {
    pub fn new(prober: Arc<dyn HandshakeProber>, limits: ScanLimits, probe_timeout: Duration) -> Self {
        Self {
            prober,
            limits,
            probe_timeout,
            force_tls: false,
        }
    }

    /// Probe ciphers even where no protocol version was negotiated.
    pub fn with_force_tls(mut self, force_tls: bool) -> Self {
        self.force_tls = force_tls;
        self
    }

    /// Scans every target and returns one report per target, sorted by port.
    ///
    /// Cancelling `cancel`, or reaching the configured deadline, stops new
    /// probes immediately; the reports still come back, marked accordingly.
    #[instrument(skip_all, fields(targets = targets.len()))]
    pub async fn scan(
        &self,
        targets: Vec<ScanTarget>,
        protocols: &[ProtocolVersion],
        ciphers: &[CipherSuite],
        cancel: CancellationToken,
    ) -> Vec<CapabilityReport> {
        let ctx = Arc::new(TargetContext {
            prober: self.prober.clone(),
            protocols: protocols.to_vec(),
            ciphers: ciphers.to_vec(),
            limits: self.limits.clone(),
            probe_timeout: self.probe_timeout,
            force_tls: self.force_tls,
            limiter: self.limits.rate.map(RateLimiter::new),
        });

        let deadline = self.limits.deadline.map(|deadline| {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(deadline).await;
                warn!(?deadline, "scan deadline reached, cancelling outstanding probes");
                cancel.cancel();
            })
        });

        let sem = Arc::new(Semaphore::new(self.limits.max_targets.max(1)));
        let mut set = JoinSet::new();
        for target in targets {
            let sem = sem.clone();
            let ctx = ctx.clone();
            let cancel = cancel.clone();
            set.spawn(async move {
                // held until the target's report is built
                let _permit = sem.acquire_owned().await;
                scan_target(&ctx, target, &cancel).await
            });
        }

        let mut reports = Vec::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(report) => reports.push(report),
                Err(err) => warn!(error = %err, "target task failed"),
            }
        }
        if let Some(timer) = deadline {
            timer.abort();
        }

        reports.sort_by(|a, b| {
            (a.target().port, &a.target().address).cmp(&(b.target().port, &b.target().address))
        });
        info!(reports = reports.len(), "scan finished");
        reports
    }
}
