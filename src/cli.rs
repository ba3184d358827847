use ssl_baseline::model::{
    Backend, Config, DiscoveryConfig, OutputConfig, OutputFormat, ProbeConfig, ProtocolVersion,
    ScanLimits, ScanTarget,
};
use clap::{ArgAction, Parser};
use std::collections::BTreeSet;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Scan local TLS endpoints and check them against a protocol/cipher baseline",
    long_about = None
)]
pub struct Cli {
    /// Endpoint to scan as host:port (repeatable); skips port discovery
    #[arg(short = 't', long = "target", value_name = "HOST:PORT")]
    pub targets: Vec<ScanTarget>,

    /// Protocol versions to probe, comma separated (e.g. ssl3,tls1.2)
    #[arg(long = "protocols", value_delimiter = ',', value_name = "VERSIONS")]
    pub protocols: Vec<ProtocolVersion>,

    /// Only probe cipher suites whose IANA or OpenSSL name matches this regex
    #[arg(long = "ciphers", value_name = "REGEX")]
    pub ciphers: Option<String>,

    /// YAML ruleset; the built-in baseline is used when omitted
    #[arg(long = "policy", value_name = "FILE")]
    pub policy: Option<PathBuf>,

    /// Port to leave out of discovery (repeatable)
    #[arg(long = "exclude-port", value_name = "PORT")]
    pub exclude_ports: Vec<u16>,

    /// Bind address to leave out of discovery (repeatable)
    #[arg(long = "exclude-address", value_name = "IP")]
    pub exclude_addresses: Vec<IpAddr>,

    /// Host to dial for ports bound to a catch-all or loopback address
    #[arg(long = "connect-host", value_name = "HOST")]
    pub connect_host: Option<String>,

    /// Node name reported with each result (defaults to the hostname)
    #[arg(long = "node-name", value_name = "NAME")]
    pub node_name: Option<String>,

    /// Treat every port as TLS even when no protocol version negotiates
    #[arg(long = "force-tls", action = ArgAction::SetTrue)]
    pub force_tls: bool,

    /// Per-probe connect and handshake timeout in milliseconds
    #[arg(long = "timeout-ms", default_value_t = 3000)]
    pub timeout_ms: u64,

    /// Extra attempts for probes that time out
    #[arg(long = "retries", default_value_t = 1)]
    pub retries: u32,

    /// Targets scanned concurrently
    #[arg(long = "max-targets", default_value_t = 8)]
    pub max_targets: usize,

    /// Probes in flight per target
    #[arg(long = "probes-per-target", default_value_t = 4)]
    pub probes_per_target: usize,

    /// Probe errors tolerated per target before giving up on it
    #[arg(long = "error-threshold", default_value_t = 3)]
    pub error_threshold: usize,

    /// Overall scan deadline in milliseconds
    #[arg(long = "deadline-ms", value_name = "MS")]
    pub deadline_ms: Option<u64>,

    /// New probe connections per second across the scan
    #[arg(long = "rate", value_name = "PER_SEC")]
    pub rate: Option<u32>,

    /// Handshake implementation
    #[arg(long = "backend", default_value_t = Backend::Raw)]
    pub backend: Backend,

    /// Output format
    #[arg(long = "output", default_value_t = OutputFormat::Jsonl)]
    pub output: OutputFormat,

    /// Human-readable output instead of JSONL
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pub pretty: bool,
}

impl Cli {
    pub fn into_config(self) -> anyhow::Result<Config> {
        if self.timeout_ms == 0 {
            anyhow::bail!("timeout must be greater than zero");
        }

        if self.max_targets == 0 {
            anyhow::bail!("max-targets must be greater than zero");
        }

        if self.probes_per_target == 0 {
            anyhow::bail!("probes-per-target must be greater than zero");
        }

        if self.rate == Some(0) {
            anyhow::bail!("rate must be greater than zero");
        }

        if self.deadline_ms == Some(0) {
            anyhow::bail!("deadline must be greater than zero");
        }

        if let Some(pattern) = &self.ciphers {
            regex::Regex::new(pattern)
                .map_err(|err| anyhow::anyhow!("invalid --ciphers pattern: {err}"))?;
        }

        let mut protocols = if self.protocols.is_empty() {
            ProtocolVersion::ALL.to_vec()
        } else {
            self.protocols
        };
        protocols.sort();
        protocols.dedup();

        Ok(Config {
            targets: self.targets,
            discovery: DiscoveryConfig {
                excluded_ports: self.exclude_ports.into_iter().collect::<BTreeSet<_>>(),
                excluded_addresses: self.exclude_addresses,
                connect_host: self.connect_host,
            },
            node_name: self.node_name,
            force_tls: self.force_tls,
            protocols,
            cipher_filter: self.ciphers,
            probe: ProbeConfig {
                timeout: Duration::from_millis(self.timeout_ms),
                retries: self.retries,
                backend: self.backend,
            },
            limits: ScanLimits {
                max_targets: self.max_targets,
                probes_per_target: self.probes_per_target,
                error_threshold: self.error_threshold,
                deadline: self.deadline_ms.map(Duration::from_millis),
                rate: self.rate,
            },
            policy: self.policy,
            output: OutputConfig {
                format: if self.pretty {
                    OutputFormat::Pretty
                } else {
                    self.output
                },
            },
        })
    }
}
