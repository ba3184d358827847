#![cfg(target_endian = "little")]

use ssl_baseline::discover::{Discoverer, ProcNetTcp};
use ssl_baseline::error::DiscoveryError;
use ssl_baseline::model::{DiscoveryConfig, ScanTarget};
use std::collections::BTreeSet;
use std::fs;

const HEADER: &str = "  sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode\n";

fn tables(v4_rows: &[&str], v6_rows: Option<&[&str]>) -> (tempfile::TempDir, ProcNetTcp) {
    let dir = tempfile::tempdir().unwrap();
    let v4 = dir.path().join("tcp");
    let v6 = dir.path().join("tcp6");
    fs::write(&v4, format!("{HEADER}{}\n", v4_rows.join("\n"))).unwrap();
    if let Some(rows) = v6_rows {
        fs::write(&v6, format!("{HEADER}{}\n", rows.join("\n"))).unwrap();
    }
    let table = ProcNetTcp::with_paths(v4, v6);
    (dir, table)
}

#[test]
fn merges_ipv4_and_ipv6_listeners() {
    let (_dir, table) = tables(
        &[
            "   0: 0100007F:01BB 00000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 1 1",
            "   1: 0100007F:0050 00000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 2 1",
            "   2: 0100007F:1F90 0100007F:D431 01 00000000:00000000 00:00000000 00000000     0        0 3 1",
        ],
        Some(&[
            "   0: 00000000000000000000000000000000:01BB 00000000000000000000000000000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 4 1",
            "   1: 00000000000000000000000000000000:03E1 00000000000000000000000000000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 5 1",
        ]),
    );
    let cfg = DiscoveryConfig {
        connect_host: Some("scanhost".into()),
        excluded_ports: BTreeSet::from([80]),
        ..Default::default()
    };

    let targets = Discoverer::new(table, cfg).discover().unwrap();
    assert_eq!(
        targets,
        vec![ScanTarget::new("scanhost", 443), ScanTarget::new("scanhost", 993)]
    );
}

#[test]
fn tolerates_missing_ipv6_table() {
    let (_dir, table) = tables(
        &["   0: 0A000005:20FB 00000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 1 1"],
        None,
    );
    let targets = Discoverer::new(table, DiscoveryConfig::default()).discover().unwrap();
    assert_eq!(targets, vec![ScanTarget::new("5.0.0.10", 8443)]);
}

#[test]
fn malformed_row_is_fatal() {
    let (_dir, table) = tables(&["   0: 0100007F:zz 00000000:0000 0A"], None);
    let err = Discoverer::new(table, DiscoveryConfig::default())
        .discover()
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::Malformed { line: 2, .. }));
}
