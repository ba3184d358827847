//! Declarative pass/fail rules evaluated over capability reports.
//!
//! A rule names one thing that may be supported (a protocol version, a set of
//! cipher suites, or a cipher category) and whether it must be enabled or
//! disabled.

mod loader;

pub use loader::{load_file, load_str, DEFAULT_POLICY};

use crate::model::ProtocolVersion;
use crate::report::CapabilityReport;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    KeyExchange,
    Authentication,
    Encryption,
    Mac,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryKind::KeyExchange => "key exchange",
            CategoryKind::Authentication => "authentication",
            CategoryKind::Encryption => "encryption",
            CategoryKind::Mac => "mac",
        };
        f.write_str(label)
    }
}

/// Selects the supported items a rule is about.
#[derive(Debug, Clone)]
pub enum Matcher {
    Protocol(ProtocolVersion),
    /// Matched against both the IANA and the OpenSSL suite name.
    Cipher(Regex),
    /// Matched against the category label, e.g. `ECDHE` or `AESGCM(128)`.
    Category(CategoryKind, Regex),
}

impl Matcher {
    /// Names of the supported items this matcher selects.
    pub fn matching(&self, report: &CapabilityReport) -> Vec<String> {
        match self {
            Matcher::Protocol(version) => {
                if report.supports_protocol(*version) {
                    vec![version.label().to_string()]
                } else {
                    Vec::new()
                }
            }
            Matcher::Cipher(re) => report
                .supported_ciphers()
                .iter()
                .filter(|s| re.is_match(s.name) || re.is_match(s.openssl_name))
                .map(|s| s.name.to_string())
                .collect(),
            Matcher::Category(kind, re) => report
                .supported_ciphers()
                .iter()
                .filter(|s| {
                    let label = match kind {
                        CategoryKind::KeyExchange => s.key_exchange.label(),
                        CategoryKind::Authentication => s.authentication.label(),
                        CategoryKind::Encryption => s.encryption.label(),
                        CategoryKind::Mac => s.mac.label(),
                    };
                    re.is_match(label)
                })
                .map(|s| s.name.to_string())
                .collect(),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Protocol(version) => write!(f, "protocol {version}"),
            Matcher::Cipher(re) => write!(f, "ciphers /{re}/"),
            Matcher::Category(kind, re) => write!(f, "{kind} /{re}/"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub title: String,
    /// 0.0 is informational, 1.0 critical.
    pub impact: f32,
    pub matcher: Matcher,
    pub require: Requirement,
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    force_tls: bool,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            force_tls: false,
        }
    }

    /// Apply rules even to endpoints that negotiated no protocol.
    pub fn with_force_tls(mut self, force_tls: bool) -> Self {
        self.force_tls = force_tls;
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn applies_to(&self, report: &CapabilityReport) -> bool {
        self.force_tls || report.is_tls()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub rule: String,
    pub title: String,
    pub impact: f32,
    pub pass: bool,
    pub details: String,
}

impl Verdict {
    /// A failure that should change the exit status.
    pub fn is_mandatory_failure(&self) -> bool {
        !self.pass && self.impact > 0.0
    }
}

pub fn evaluate(report: &CapabilityReport, ruleset: &RuleSet) -> Vec<Verdict> {
    if !ruleset.applies_to(report) {
        return Vec::new();
    }
    ruleset
        .rules
        .iter()
        .map(|rule| {
            let found = rule.matcher.matching(report);
            let (pass, details) = match (rule.require, found.is_empty()) {
                (Requirement::Enabled, false) => (true, format!("supported: {}", found.join(", "))),
                (Requirement::Enabled, true) => (false, format!("no support for {}", rule.matcher)),
                (Requirement::Disabled, true) => (true, format!("no support for {}", rule.matcher)),
                (Requirement::Disabled, false) => (false, format!("supported: {}", found.join(", "))),
            };
            Verdict {
                rule: rule.name.clone(),
                title: rule.title.clone(),
                impact: rule.impact,
                pass,
                details,
            }
        })
        .collect()
}
