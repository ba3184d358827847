use crate::cipher::CipherSuite;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// A single endpoint to scan.
///
/// An empty address stands for "any local interface" and is probed through
/// the loopback interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScanTarget {
    pub address: String,
    pub port: u16,
}

impl ScanTarget {
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }

    /// Host used when opening the TCP connection.
    pub fn connect_host(&self) -> &str {
        if self.address.is_empty() {
            "127.0.0.1"
        } else {
            self.address.as_str()
        }
    }

    /// Host name worth sending as SNI, if the address is not an IP literal.
    pub fn sni_host(&self) -> Option<&str> {
        let host = self.connect_host();
        if host.parse::<IpAddr>().is_ok() || host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let host = self.connect_host();
        if host.contains(':') {
            write!(f, "[{}]:{}", host, self.port)
        } else {
            write!(f, "{}:{}", host, self.port)
        }
    }
}

impl FromStr for ScanTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .trim()
            .rsplit_once(':')
            .ok_or_else(|| format!("target `{s}` must be host:port"))?;
        let host = host.trim_start_matches('[').trim_end_matches(']');
        let port: u16 = port
            .parse()
            .map_err(|_| format!("target `{s}` has an invalid port"))?;
        if port == 0 {
            return Err(format!("target `{s}` has port 0"));
        }
        Ok(ScanTarget::new(host, port))
    }
}

/// SSL/TLS protocol versions, ordered oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProtocolVersion {
    SSLv2,
    SSLv3,
    TLS1_0,
    TLS1_1,
    TLS1_2,
    TLS1_3,
}

impl ProtocolVersion {
    pub const ALL: [ProtocolVersion; 6] = [
        ProtocolVersion::SSLv2,
        ProtocolVersion::SSLv3,
        ProtocolVersion::TLS1_0,
        ProtocolVersion::TLS1_1,
        ProtocolVersion::TLS1_2,
        ProtocolVersion::TLS1_3,
    ];

    pub fn wire_version(self) -> u16 {
        match self {
            ProtocolVersion::SSLv2 => 0x0002,
            ProtocolVersion::SSLv3 => 0x0300,
            ProtocolVersion::TLS1_0 => 0x0301,
            ProtocolVersion::TLS1_1 => 0x0302,
            ProtocolVersion::TLS1_2 => 0x0303,
            ProtocolVersion::TLS1_3 => 0x0304,
        }
    }

    pub fn from_wire(value: u16) -> Option<Self> {
        ProtocolVersion::ALL
            .into_iter()
            .find(|v| v.wire_version() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            ProtocolVersion::SSLv2 => "SSLv2",
            ProtocolVersion::SSLv3 => "SSLv3",
            ProtocolVersion::TLS1_0 => "TLSv1.0",
            ProtocolVersion::TLS1_1 => "TLSv1.1",
            ProtocolVersion::TLS1_2 => "TLSv1.2",
            ProtocolVersion::TLS1_3 => "TLSv1.3",
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProtocolVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '.' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "ssl2" | "sslv2" | "ssl20" => Ok(ProtocolVersion::SSLv2),
            "ssl3" | "sslv3" | "ssl30" => Ok(ProtocolVersion::SSLv3),
            "tls1" | "tls10" | "tlsv1" | "tlsv10" => Ok(ProtocolVersion::TLS1_0),
            "tls11" | "tlsv11" => Ok(ProtocolVersion::TLS1_1),
            "tls12" | "tlsv12" => Ok(ProtocolVersion::TLS1_2),
            "tls13" | "tlsv13" => Ok(ProtocolVersion::TLS1_3),
            _ => Err(format!("unknown protocol version `{s}`")),
        }
    }
}

impl Serialize for ProtocolVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ProtocolVersion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// What a single probe tests for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Dimension {
    Protocol(ProtocolVersion),
    Cipher(CipherSuite),
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Protocol(v) => write!(f, "{v}"),
            Dimension::Cipher(suite) => write!(f, "{}", suite.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum ProbeOutcome {
    Negotiated,
    Rejected,
    ConnectionRefused,
    Timeout,
    /// Never dispatched because the scan was cancelled first.
    Cancelled,
    Error(String),
}

impl ProbeOutcome {
    /// Negotiated and Rejected are the two conclusive answers; everything
    /// else is kept for diagnostics.
    pub fn is_conclusive(&self) -> bool {
        matches!(self, ProbeOutcome::Negotiated | ProbeOutcome::Rejected)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Negotiated => f.write_str("negotiated"),
            ProbeOutcome::Rejected => f.write_str("rejected"),
            ProbeOutcome::ConnectionRefused => f.write_str("connection refused"),
            ProbeOutcome::Timeout => f.write_str("timeout"),
            ProbeOutcome::Cancelled => f.write_str("cancelled"),
            ProbeOutcome::Error(reason) => write!(f, "error: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub target: ScanTarget,
    pub dimension: Dimension,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
    pub attempts: u32,
}

impl ProbeResult {
    pub fn new(target: ScanTarget, dimension: Dimension, outcome: ProbeOutcome, attempts: u32) -> Self {
        Self {
            target,
            dimension,
            outcome,
            attempts,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub targets: Vec<ScanTarget>,
    pub discovery: DiscoveryConfig,
    pub node_name: Option<String>,
    pub force_tls: bool,
    pub protocols: Vec<ProtocolVersion>,
    pub cipher_filter: Option<String>,
    pub probe: ProbeConfig,
    pub limits: ScanLimits,
    pub policy: Option<PathBuf>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    pub excluded_ports: BTreeSet<u16>,
    pub excluded_addresses: Vec<IpAddr>,
    /// Reachable host substituted for catch-all and loopback bind addresses.
    pub connect_host: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub timeout: Duration,
    pub retries: u32,
    pub backend: Backend,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(3000),
            retries: 1,
            backend: Backend::Raw,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanLimits {
    pub max_targets: usize,
    pub probes_per_target: usize,
    pub error_threshold: usize,
    pub deadline: Option<Duration>,
    /// New probe connections per second across the whole scan.
    pub rate: Option<u32>,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_targets: 8,
            probes_per_target: 4,
            error_threshold: 3,
            deadline: None,
            rate: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Backend {
    Raw,
    #[cfg(feature = "openssl-backend")]
    Openssl,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Raw => write!(f, "raw"),
            #[cfg(feature = "openssl-backend")]
            Backend::Openssl => write!(f, "openssl"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Jsonl,
    Pretty,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Jsonl => write!(f, "jsonl"),
            OutputFormat::Pretty => write!(f, "pretty"),
        }
    }
}
