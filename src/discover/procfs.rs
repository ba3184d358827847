use super::{ListeningSocket, SocketTable};
use crate::error::DiscoveryError;
use std::fs;
use std::io::ErrorKind;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::{Path, PathBuf};

const TCP_LISTEN: &str = "0A";

/// Reads the kernel's `/proc/net/tcp` and `/proc/net/tcp6` tables.
#[derive(Debug, Clone)]
pub struct ProcNetTcp {
    v4: PathBuf,
    v6: PathBuf,
}

impl Default for ProcNetTcp {
    fn default() -> Self {
        Self::with_paths("/proc/net/tcp", "/proc/net/tcp6")
    }
}

impl ProcNetTcp {
    pub fn with_paths(v4: impl Into<PathBuf>, v6: impl Into<PathBuf>) -> Self {
        Self {
            v4: v4.into(),
            v6: v6.into(),
        }
    }
}

impl SocketTable for ProcNetTcp {
    fn listening(&self) -> Result<Vec<ListeningSocket>, DiscoveryError> {
        let mut sockets = read_table(&self.v4)?;
        match fs::read_to_string(&self.v6) {
            Ok(content) => sockets.extend(parse_table(&self.v6, &content)?),
            // hosts with IPv6 disabled have no tcp6 table
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.v6.display(), "no IPv6 socket table");
            }
            Err(source) => {
                return Err(DiscoveryError::Unreadable {
                    path: self.v6.clone(),
                    source,
                })
            }
        }
        Ok(sockets)
    }
}

fn read_table(path: &Path) -> Result<Vec<ListeningSocket>, DiscoveryError> {
    let content = fs::read_to_string(path).map_err(|source| DiscoveryError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(path, &content)
}

/// Parses one socket table, keeping only sockets in the LISTEN state.
pub fn parse_table(path: &Path, content: &str) -> Result<Vec<ListeningSocket>, DiscoveryError> {
    let malformed = |line: usize, reason: String| DiscoveryError::Malformed {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut out = Vec::new();
    // first line is the column header
    for (idx, raw) in content.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        let fields: Vec<&str> = raw.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() < 4 {
            return Err(malformed(line_no, format!("expected at least 4 columns, got {}", fields.len())));
        }
        if fields[3] != TCP_LISTEN {
            continue;
        }
        let (addr_hex, port_hex) = fields[1]
            .split_once(':')
            .ok_or_else(|| malformed(line_no, format!("bad local address `{}`", fields[1])))?;
        let address = parse_address(addr_hex)
            .ok_or_else(|| malformed(line_no, format!("bad address `{addr_hex}`")))?;
        let port = u16::from_str_radix(port_hex, 16)
            .map_err(|_| malformed(line_no, format!("bad port `{port_hex}`")))?;
        out.push(ListeningSocket { address, port });
    }
    Ok(out)
}

/// Kernel tables print each 32-bit word of the address in host byte order.
fn parse_address(hex: &str) -> Option<IpAddr> {
    match hex.len() {
        8 => {
            let word = u32::from_str_radix(hex, 16).ok()?;
            Some(IpAddr::V4(Ipv4Addr::from(word.to_ne_bytes())))
        }
        32 => {
            let mut octets = [0u8; 16];
            for (i, chunk) in octets.chunks_mut(4).enumerate() {
                let word = u32::from_str_radix(&hex[i * 8..i * 8 + 8], 16).ok()?;
                chunk.copy_from_slice(&word.to_ne_bytes());
            }
            Some(IpAddr::V6(Ipv6Addr::from(octets)))
        }
        _ => None,
    }
}

#[cfg(all(test, target_endian = "little"))]
mod tests {
    use super::*;

    const TCP: &str = "  sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode
   0: 00000000:01BB 00000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 662 1 0000000000000000 100 0 0 10 0
   1: 0100007F:0050 00000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 663 1 0000000000000000 100 0 0 10 0
   2: 0A00000A:01BB 0B00000A:D431 01 00000000:00000000 00:00000000 00000000     0        0 664 1 0000000000000000 100 0 0 10 0
";

    #[test]
    fn keeps_only_listening_rows() {
        let sockets = parse_table(Path::new("tcp"), TCP).unwrap();
        assert_eq!(
            sockets,
            vec![
                ListeningSocket {
                    address: "0.0.0.0".parse().unwrap(),
                    port: 443
                },
                ListeningSocket {
                    address: "127.0.0.1".parse().unwrap(),
                    port: 80
                },
            ]
        );
    }

    #[test]
    fn decodes_ipv6_words() {
        assert_eq!(
            parse_address("00000000000000000000000001000000"),
            Some("::1".parse().unwrap())
        );
        assert_eq!(
            parse_address("00000000000000000000000000000000"),
            Some("::".parse().unwrap())
        );
    }

    #[test]
    fn rejects_garbage_rows() {
        let table = "header\n   0: ZZZZ:0050 00000000:0000 0A\n";
        let err = parse_table(Path::new("tcp"), table).unwrap_err();
        assert!(matches!(err, DiscoveryError::Malformed { line: 2, .. }));
    }
}
