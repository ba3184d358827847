mod orchestrator;
mod rate;
mod target;

pub use orchestrator::Orchestrator;
pub use rate::RateLimiter;

use crate::cipher;
use crate::discover::Discoverer;
use crate::model::{Config, ScanTarget};
use crate::output::{OutputChannel, TargetSummary};
use crate::policy::{self, evaluate, RuleSet};
use crate::probe::{self, HandshakeProber};
use crate::util::local_hostname;
use anyhow::Context;
use regex::Regex;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

pub struct Engine {
    cfg: Config,
    sink: OutputChannel,
    prober: Arc<dyn HandshakeProber>,
}

impl Engine {
    pub fn new(cfg: Config, sink: OutputChannel) -> anyhow::Result<Self> {
        Ok(Self {
            prober: probe::build(&cfg.probe),
            cfg,
            sink,
        })
    }

    /// Replaces the configured backend.
    pub fn with_prober(mut self, prober: Arc<dyn HandshakeProber>) -> Self {
        self.prober = prober;
        self
    }

    /// Discovers or takes the targets, scans them, evaluates the policy and
    /// emits one summary per target. Returns `true` when every verdict with
    /// a non-zero impact passed.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> anyhow::Result<bool> {
        // an unusable policy should fail before any probing
        let rules = self.load_rules()?;
        let targets = self.targets()?;
        let filter = self
            .cfg
            .cipher_filter
            .as_deref()
            .map(Regex::new)
            .transpose()
            .context("invalid cipher filter")?;
        let ciphers = cipher::catalog(filter.as_ref());
        info!(
            targets = targets.len(),
            protocols = self.cfg.protocols.len(),
            ciphers = ciphers.len(),
            "starting scan"
        );

        let cancel = CancellationToken::new();
        let ctrl_c = cancel.clone();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupted, cancelling scan");
                ctrl_c.cancel();
            }
        });

        let orchestrator = Orchestrator::new(self.prober.clone(), self.cfg.limits.clone(), self.cfg.probe.timeout)
            .with_force_tls(self.cfg.force_tls);
        let reports = orchestrator
            .scan(targets, &self.cfg.protocols, &ciphers, cancel)
            .await;
        interrupt.abort();

        let node = self.cfg.node_name.clone().unwrap_or_else(local_hostname);
        let mut passed = true;
        for report in reports {
            let verdicts = evaluate(&report, &rules);
            let summary = TargetSummary::new(node.clone(), report, verdicts);
            if summary.failed() {
                passed = false;
            }
            self.sink.emit(summary).await?;
        }
        self.sink.shutdown().await?;
        Ok(passed)
    }

    fn load_rules(&self) -> anyhow::Result<RuleSet> {
        let rules = match &self.cfg.policy {
            Some(path) => policy::load_file(path)
                .with_context(|| format!("failed to load policy {}", path.display()))?,
            None => policy::load_str(policy::DEFAULT_POLICY).context("built-in policy is invalid")?,
        };
        Ok(rules.with_force_tls(self.cfg.force_tls))
    }

    fn targets(&self) -> anyhow::Result<Vec<ScanTarget>> {
        if !self.cfg.targets.is_empty() {
            return Ok(self.cfg.targets.clone());
        }
        let targets = Discoverer::local(self.cfg.discovery.clone())
            .discover()
            .context("port discovery failed")?;
        info!(count = targets.len(), "discovered listening ports");
        Ok(targets)
    }
}
