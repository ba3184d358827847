mod procfs;

pub use procfs::ProcNetTcp;

use crate::error::DiscoveryError;
use crate::model::{DiscoveryConfig, ScanTarget};
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use tracing::{debug, instrument};

/// A listening TCP socket as reported by the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListeningSocket {
    pub address: IpAddr,
    pub port: u16,
}

/// Source of the host's listening sockets.
pub trait SocketTable: Send + Sync {
    fn listening(&self) -> Result<Vec<ListeningSocket>, DiscoveryError>;
}

pub struct Discoverer<T> {
    table: T,
    cfg: DiscoveryConfig,
}

impl Discoverer<ProcNetTcp> {
    pub fn local(cfg: DiscoveryConfig) -> Self {
        Self::new(ProcNetTcp::default(), cfg)
    }
}

impl<T: SocketTable> Discoverer<T> {
    pub fn new(table: T, cfg: DiscoveryConfig) -> Self {
        Self { table, cfg }
    }

    /// Listening endpoints as scan targets: one per port, sorted by port.
    #[instrument(skip(self))]
    pub fn discover(&self) -> Result<Vec<ScanTarget>, DiscoveryError> {
        let sockets = self.table.listening()?;
        debug!(sockets = sockets.len(), "read socket tables");
        Ok(normalize(sockets, &self.cfg))
    }
}

/// Applies address exclusions, per-port dedup (first seen wins), port
/// exclusions and catch-all substitution, then sorts by port.
pub fn normalize(sockets: Vec<ListeningSocket>, cfg: &DiscoveryConfig) -> Vec<ScanTarget> {
    let mut seen = HashSet::new();
    let mut targets: Vec<ScanTarget> = sockets
        .into_iter()
        .filter(|s| s.port != 0)
        .filter(|s| !cfg.excluded_addresses.contains(&s.address))
        .filter(|s| seen.insert(s.port))
        .filter(|s| !cfg.excluded_ports.contains(&s.port))
        .map(|s| ScanTarget::new(reachable_host(s.address, cfg.connect_host.as_deref()), s.port))
        .collect();
    targets.sort_by_key(|t| t.port);
    targets
}

/// Catch-all and loopback binds cannot be dialled as-is from the outside, so
/// they are swapped for the supplied host or the loopback of their family.
fn reachable_host(address: IpAddr, connect_host: Option<&str>) -> String {
    let catch_all = match address {
        IpAddr::V4(v4) => v4.is_unspecified() || v4 == Ipv4Addr::LOCALHOST,
        IpAddr::V6(v6) => v6.is_unspecified() || v6 == Ipv6Addr::LOCALHOST,
    };
    if !catch_all {
        return address.to_string();
    }
    match (connect_host, address) {
        (Some(host), _) => host.to_string(),
        (None, IpAddr::V4(_)) => Ipv4Addr::LOCALHOST.to_string(),
        (None, IpAddr::V6(_)) => Ipv6Addr::LOCALHOST.to_string(),
    }
}
