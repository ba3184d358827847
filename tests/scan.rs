mod support;

use ssl_baseline::cipher;
use ssl_baseline::engine::{Engine, Orchestrator};
use ssl_baseline::model::{
    Backend, Config, DiscoveryConfig, OutputConfig, OutputFormat, ProbeConfig, ProtocolVersion,
    ScanLimits, ScanTarget,
};
use ssl_baseline::output::OutputChannel;
use ssl_baseline::policy::{self, evaluate};
use ssl_baseline::probe;
use ssl_baseline::report::TargetStatus;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use support::Behaviour;
use tokio_util::sync::CancellationToken;

const SCENARIO_RULES: &str = r#"
rules:
  - name: tls1.2
    impact: 0.5
    dimension: protocol
    pattern: tls1.2
    require: enabled
  - name: ssl3
    impact: 1.0
    dimension: protocol
    pattern: ssl3
    require: disabled
  - name: ecdhe
    impact: 0.5
    dimension: key_exchange
    pattern: ^ECDHE$
    require: enabled
"#;

fn orchestrator() -> Orchestrator {
    let probe_cfg = ProbeConfig {
        timeout: Duration::from_millis(1000),
        ..Default::default()
    };
    Orchestrator::new(probe::build(&probe_cfg), ScanLimits::default(), probe_cfg.timeout)
}

#[tokio::test]
async fn tls12_endpoint_passes_the_baseline() {
    let server = support::spawn(Behaviour::Tls12 { suite: 0xC02F }).await;
    let reports = orchestrator()
        .scan(
            vec![ScanTarget::new("127.0.0.1", server.port)],
            &ProtocolVersion::ALL,
            &cipher::catalog(None),
            CancellationToken::new(),
        )
        .await;

    let report = &reports[0];
    assert_eq!(report.status(), TargetStatus::Tls);
    assert_eq!(
        report.supported_protocols().iter().copied().collect::<Vec<_>>(),
        vec![ProtocolVersion::TLS1_2]
    );
    let names: Vec<&str> = report.supported_ciphers().iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256"]);
    assert!(report.probe_errors().is_empty());

    let rules = policy::load_str(SCENARIO_RULES).unwrap();
    let verdicts = evaluate(report, &rules);
    assert_eq!(verdicts.len(), 3);
    assert!(verdicts.iter().all(|v| v.pass), "{verdicts:?}");
}

#[tokio::test]
async fn hangup_port_is_not_tls_and_gets_no_cipher_probes() {
    let server = support::spawn(Behaviour::Hangup).await;
    let reports = orchestrator()
        .scan(
            vec![ScanTarget::new("127.0.0.1", server.port)],
            &ProtocolVersion::ALL,
            &cipher::catalog(None),
            CancellationToken::new(),
        )
        .await;

    let report = &reports[0];
    assert_eq!(report.status(), TargetStatus::NotTls);
    assert!(report.supported_ciphers().is_empty());
    assert_eq!(report.probes_issued(), ProtocolVersion::ALL.len());
    assert_eq!(server.accepted(), ProtocolVersion::ALL.len());

    let rules = policy::load_str(policy::DEFAULT_POLICY).unwrap();
    assert!(evaluate(report, &rules).is_empty());
}

#[tokio::test]
async fn closed_port_is_unreachable_after_one_probe() {
    let port = support::closed_port().await;
    let reports = orchestrator()
        .scan(
            vec![ScanTarget::new("127.0.0.1", port)],
            &ProtocolVersion::ALL,
            &cipher::catalog(None),
            CancellationToken::new(),
        )
        .await;
    assert_eq!(reports[0].status(), TargetStatus::Unreachable);
    assert_eq!(reports[0].probes_issued(), 1);
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn config(targets: Vec<ScanTarget>) -> Config {
    Config {
        targets,
        discovery: DiscoveryConfig::default(),
        node_name: Some("web01".into()),
        force_tls: false,
        protocols: ProtocolVersion::ALL.to_vec(),
        cipher_filter: Some("ECDHE".into()),
        probe: ProbeConfig {
            timeout: Duration::from_millis(1000),
            retries: 1,
            backend: Backend::Raw,
        },
        limits: ScanLimits::default(),
        policy: None,
        output: OutputConfig {
            format: OutputFormat::Jsonl,
        },
    }
}

#[tokio::test]
async fn engine_emits_summaries_and_passes() {
    let tls = support::spawn(Behaviour::Tls12 { suite: 0xC02F }).await;
    let plain = support::spawn(Behaviour::Hangup).await;
    let cfg = config(vec![
        ScanTarget::new("127.0.0.1", tls.port),
        ScanTarget::new("127.0.0.1", plain.port),
    ]);

    let captured = Captured::default();
    let sink = OutputChannel::with_writer(cfg.output.clone(), captured.clone()).unwrap();
    let mut engine = Engine::new(cfg, sink).unwrap();
    assert!(engine.run().await.unwrap());

    let out = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    let lines: Vec<serde_json::Value> = out
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    let tls_line = lines
        .iter()
        .find(|v| v["report"]["target"]["port"] == tls.port)
        .unwrap();
    assert_eq!(tls_line["node"], "web01");
    assert_eq!(tls_line["report"]["status"], "tls");
    assert_eq!(
        tls_line["categories"]["key_exchange"]["ECDHE"][0],
        "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256"
    );
    assert!(tls_line["verdicts"]
        .as_array()
        .unwrap()
        .iter()
        .all(|v| v["pass"] == true));
}

#[tokio::test]
async fn engine_reports_failing_baseline() {
    let server = support::spawn(Behaviour::Tls12 { suite: 0xC02F }).await;
    let mut policy_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        policy_file,
        "rules:\n  - name: tls1.3\n    impact: 0.5\n    dimension: protocol\n    pattern: tls1.3\n    require: enabled"
    )
    .unwrap();
    let mut cfg = config(vec![ScanTarget::new("127.0.0.1", server.port)]);
    cfg.policy = Some(policy_file.path().to_path_buf());

    let sink = OutputChannel::with_writer(cfg.output.clone(), Captured::default()).unwrap();
    let mut engine = Engine::new(cfg, sink).unwrap();
    assert!(!engine.run().await.unwrap());
}

#[tokio::test]
async fn invalid_policy_fails_before_scanning() {
    let server = support::spawn(Behaviour::Tls12 { suite: 0xC02F }).await;
    let mut cfg = config(vec![ScanTarget::new("127.0.0.1", server.port)]);
    cfg.policy = Some("/nonexistent/policy.yaml".into());

    let sink = OutputChannel::with_writer(cfg.output.clone(), Captured::default()).unwrap();
    let mut engine = Engine::new(cfg, sink).unwrap();
    assert!(engine.run().await.is_err());
    assert_eq!(server.accepted(), 0);
}
