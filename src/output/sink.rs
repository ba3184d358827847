use super::TargetSummary;
use crate::model::{OutputConfig, OutputFormat};
use std::io::{BufWriter, Stdout, Write};

pub struct OutputSink<W: Write = Stdout> {
    cfg: OutputConfig,
    writer: BufWriter<W>,
}

impl OutputSink<Stdout> {
    pub fn new(cfg: OutputConfig) -> Self {
        Self::with_writer(cfg, std::io::stdout())
    }
}

impl<W: Write> OutputSink<W> {
    pub fn with_writer(cfg: OutputConfig, writer: W) -> Self {
        Self {
            cfg,
            writer: BufWriter::new(writer),
        }
    }

    pub fn write_summary(&mut self, summary: &TargetSummary) -> anyhow::Result<()> {
        match self.cfg.format {
            OutputFormat::Jsonl => {
                let line = serde_json::to_string(summary)?;
                writeln!(self.writer, "{line}")?;
            }
            OutputFormat::Pretty => self.write_pretty(summary)?,
        }
        Ok(())
    }

    fn write_pretty(&mut self, summary: &TargetSummary) -> anyhow::Result<()> {
        let report = &summary.report;
        writeln!(
            self.writer,
            "{} -> {} (node {})",
            report.target(),
            report.status(),
            summary.node
        )?;
        if report.is_tls() {
            let protocols: Vec<&str> = report.supported_protocols().iter().map(|v| v.label()).collect();
            writeln!(self.writer, "  protocols: {}", protocols.join(", "))?;
            for suite in report.supported_ciphers() {
                writeln!(
                    self.writer,
                    "  cipher: {} ({} {} {} {})",
                    suite.name, suite.key_exchange, suite.authentication, suite.encryption, suite.mac
                )?;
            }
        }
        for failed in report.probe_errors() {
            writeln!(
                self.writer,
                "  probe {}: {} after {} attempt(s)",
                failed.dimension, failed.outcome, failed.attempts
            )?;
        }
        for verdict in &summary.verdicts {
            writeln!(
                self.writer,
                "  [{}] {} ({:.1}) {}: {}",
                if verdict.pass { "PASS" } else { "FAIL" },
                verdict.rule,
                verdict.impact,
                verdict.title,
                verdict.details
            )?;
        }
        Ok(())
    }

    pub fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(inner) => inner,
            Err(err) => panic!("flush failed: {err}"),
        }
    }
}
