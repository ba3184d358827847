use crate::cipher::CipherSuite;
use crate::model::{Dimension, ProbeOutcome, ProbeResult, ProtocolVersion, ScanTarget};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    /// At least one protocol version was negotiated.
    Tls,
    /// The port answered but never negotiated SSL/TLS.
    NotTls,
    /// The first probe could not connect.
    Unreachable,
    /// Probing stopped early, so absence of support proves nothing.
    Inconclusive,
}

impl fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TargetStatus::Tls => "tls",
            TargetStatus::NotTls => "not tls",
            TargetStatus::Unreachable => "unreachable",
            TargetStatus::Inconclusive => "inconclusive",
        };
        f.write_str(label)
    }
}

/// What one scan learned about one target. Built once, then read-only.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilityReport {
    target: ScanTarget,
    status: TargetStatus,
    supported_protocols: BTreeSet<ProtocolVersion>,
    supported_ciphers: BTreeSet<CipherSuite>,
    probe_errors: Vec<ProbeResult>,
    probes_issued: usize,
}

impl CapabilityReport {
    pub fn target(&self) -> &ScanTarget {
        &self.target
    }

    pub fn status(&self) -> TargetStatus {
        self.status
    }

    pub fn supported_protocols(&self) -> &BTreeSet<ProtocolVersion> {
        &self.supported_protocols
    }

    pub fn supported_ciphers(&self) -> &BTreeSet<CipherSuite> {
        &self.supported_ciphers
    }

    /// Probes that ended without a conclusive answer, in completion order.
    pub fn probe_errors(&self) -> &[ProbeResult] {
        &self.probe_errors
    }

    pub fn probes_issued(&self) -> usize {
        self.probes_issued
    }

    pub fn is_tls(&self) -> bool {
        !self.supported_protocols.is_empty()
    }

    pub fn supports_protocol(&self, version: ProtocolVersion) -> bool {
        self.supported_protocols.contains(&version)
    }

    pub fn categories(&self) -> CategoryView {
        CategoryView::from_ciphers(&self.supported_ciphers)
    }
}

/// Supported suites grouped by each of their four algorithmic roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryView {
    pub key_exchange: BTreeMap<&'static str, Vec<&'static str>>,
    pub authentication: BTreeMap<&'static str, Vec<&'static str>>,
    pub encryption: BTreeMap<&'static str, Vec<&'static str>>,
    pub mac: BTreeMap<&'static str, Vec<&'static str>>,
}

impl CategoryView {
    fn from_ciphers(ciphers: &BTreeSet<CipherSuite>) -> Self {
        let mut view = CategoryView::default();
        for suite in ciphers {
            view.key_exchange
                .entry(suite.key_exchange.label())
                .or_default()
                .push(suite.name);
            view.authentication
                .entry(suite.authentication.label())
                .or_default()
                .push(suite.name);
            view.encryption
                .entry(suite.encryption.label())
                .or_default()
                .push(suite.name);
            view.mac.entry(suite.mac.label()).or_default().push(suite.name);
        }
        view
    }
}

/// Accumulates probe results for one target; owned by that target's task.
#[derive(Debug)]
pub struct ReportBuilder {
    target: ScanTarget,
    supported_protocols: BTreeSet<ProtocolVersion>,
    supported_ciphers: BTreeSet<CipherSuite>,
    probe_errors: Vec<ProbeResult>,
    probes_issued: usize,
    unreachable: bool,
    breached: bool,
}

impl ReportBuilder {
    pub fn new(target: ScanTarget) -> Self {
        Self {
            target,
            supported_protocols: BTreeSet::new(),
            supported_ciphers: BTreeSet::new(),
            probe_errors: Vec::new(),
            probes_issued: 0,
            unreachable: false,
            breached: false,
        }
    }

    pub fn record(&mut self, result: ProbeResult) {
        if result.outcome != ProbeOutcome::Cancelled {
            self.probes_issued += 1;
        }
        match (&result.outcome, result.dimension) {
            (ProbeOutcome::Negotiated, Dimension::Protocol(version)) => {
                self.supported_protocols.insert(version);
            }
            (ProbeOutcome::Negotiated, Dimension::Cipher(suite)) => {
                self.supported_ciphers.insert(suite);
            }
            (ProbeOutcome::Rejected, _) => {}
            _ => self.probe_errors.push(result),
        }
    }

    pub fn mark_unreachable(&mut self) {
        self.unreachable = true;
    }

    pub fn mark_threshold_breached(&mut self) {
        self.breached = true;
    }

    pub fn has_protocols(&self) -> bool {
        !self.supported_protocols.is_empty()
    }

    pub fn negotiated(&self) -> &BTreeSet<ProtocolVersion> {
        &self.supported_protocols
    }

    pub fn build(self) -> CapabilityReport {
        let outcome_seen = |wanted: &ProbeOutcome| self.probe_errors.iter().any(|r| &r.outcome == wanted);
        let cancelled = outcome_seen(&ProbeOutcome::Cancelled);
        let interrupted = cancelled || outcome_seen(&ProbeOutcome::Timeout);
        // a scan cut short by the deadline stays partial even when TLS answered
        let status = if self.unreachable {
            TargetStatus::Unreachable
        } else if self.breached || cancelled {
            TargetStatus::Inconclusive
        } else if !self.supported_protocols.is_empty() {
            TargetStatus::Tls
        } else if interrupted {
            TargetStatus::Inconclusive
        } else {
            TargetStatus::NotTls
        };

        CapabilityReport {
            target: self.target,
            status,
            supported_protocols: self.supported_protocols,
            supported_ciphers: self.supported_ciphers,
            probe_errors: self.probe_errors,
            probes_issued: self.probes_issued,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher;

    fn target() -> ScanTarget {
        ScanTarget::new("scanhost", 443)
    }

    fn protocol(version: ProtocolVersion, outcome: ProbeOutcome) -> ProbeResult {
        ProbeResult::new(target(), Dimension::Protocol(version), outcome, 1)
    }

    #[test]
    fn negotiated_results_fill_the_sets() {
        let suite = *cipher::lookup("0xC02F").unwrap();
        let mut builder = ReportBuilder::new(target());
        builder.record(protocol(ProtocolVersion::TLS1_2, ProbeOutcome::Negotiated));
        builder.record(protocol(ProtocolVersion::SSLv3, ProbeOutcome::Rejected));
        builder.record(ProbeResult::new(target(), Dimension::Cipher(suite), ProbeOutcome::Negotiated, 1));
        let report = builder.build();

        assert_eq!(report.status(), TargetStatus::Tls);
        assert!(report.supports_protocol(ProtocolVersion::TLS1_2));
        assert!(!report.supports_protocol(ProtocolVersion::SSLv3));
        assert!(report.supported_ciphers().contains(&suite));
        assert!(report.probe_errors().is_empty());
        assert_eq!(report.probes_issued(), 3);

        let view = report.categories();
        assert_eq!(view.key_exchange["ECDHE"], vec![suite.name]);
        assert_eq!(view.mac["AEAD"], vec![suite.name]);
    }

    #[test]
    fn status_derivation() {
        let mut builder = ReportBuilder::new(target());
        builder.record(protocol(ProtocolVersion::TLS1_2, ProbeOutcome::ConnectionRefused));
        builder.mark_unreachable();
        assert_eq!(builder.build().status(), TargetStatus::Unreachable);

        let mut builder = ReportBuilder::new(target());
        builder.record(protocol(ProtocolVersion::TLS1_2, ProbeOutcome::Rejected));
        assert_eq!(builder.build().status(), TargetStatus::NotTls);

        let mut builder = ReportBuilder::new(target());
        builder.record(protocol(ProtocolVersion::TLS1_2, ProbeOutcome::Rejected));
        builder.record(protocol(ProtocolVersion::TLS1_3, ProbeOutcome::Cancelled));
        let report = builder.build();
        assert_eq!(report.status(), TargetStatus::Inconclusive);
        assert_eq!(report.probes_issued(), 1);
        assert_eq!(report.probe_errors().len(), 1);

        let mut builder = ReportBuilder::new(target());
        builder.record(protocol(ProtocolVersion::TLS1_2, ProbeOutcome::Negotiated));
        builder.mark_threshold_breached();
        assert_eq!(builder.build().status(), TargetStatus::Inconclusive);
    }

    #[test]
    fn cancelled_suites_keep_a_tls_target_inconclusive() {
        let suite = *cipher::lookup("0xC02F").unwrap();
        let cipher = |outcome| ProbeResult::new(target(), Dimension::Cipher(suite), outcome, 1);

        let mut builder = ReportBuilder::new(target());
        builder.record(protocol(ProtocolVersion::TLS1_2, ProbeOutcome::Negotiated));
        builder.record(cipher(ProbeOutcome::Cancelled));
        let report = builder.build();
        assert_eq!(report.status(), TargetStatus::Inconclusive);
        assert!(report.is_tls());

        // a timed-out suite after retries is a plain negative answer
        let mut builder = ReportBuilder::new(target());
        builder.record(protocol(ProtocolVersion::TLS1_2, ProbeOutcome::Negotiated));
        builder.record(cipher(ProbeOutcome::Timeout));
        assert_eq!(builder.build().status(), TargetStatus::Tls);
    }
}
