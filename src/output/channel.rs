use super::sink::OutputSink;
use super::TargetSummary;
use crate::model::OutputConfig;
use std::io::Write;
use tokio::sync::mpsc;

/// Hands summaries to a blocking writer thread so stdout never stalls the scan.
#[derive(Clone)]
pub struct OutputChannel {
    inner: std::sync::Arc<OutputInner>,
}

struct OutputInner {
    tx: tokio::sync::Mutex<Option<mpsc::Sender<OutputCommand>>>,
    handle: tokio::sync::Mutex<Option<tokio::task::JoinHandle<()>>>,
}

enum OutputCommand {
    Emit(Box<TargetSummary>),
}

impl OutputChannel {
    pub fn new(cfg: OutputConfig) -> anyhow::Result<Self> {
        Self::spawn(move || OutputSink::new(cfg))
    }

    /// Writes to `writer` instead of stdout.
    pub fn with_writer<W>(cfg: OutputConfig, writer: W) -> anyhow::Result<Self>
    where
        W: Write + Send + 'static,
    {
        Self::spawn(move || OutputSink::with_writer(cfg, writer))
    }

    fn spawn<W, F>(make_sink: F) -> anyhow::Result<Self>
    where
        W: Write,
        F: FnOnce() -> OutputSink<W> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<OutputCommand>(1024);
        let handle = tokio::task::spawn_blocking(move || {
            let mut sink = make_sink();
            while let Some(cmd) = rx.blocking_recv() {
                if let Err(err) = match cmd {
                    OutputCommand::Emit(summary) => sink.write_summary(&summary),
                } {
                    tracing::error!(error = %err, "failed to write target summary");
                }
            }
            sink.flush();
        });

        Ok(Self {
            inner: std::sync::Arc::new(OutputInner {
                tx: tokio::sync::Mutex::new(Some(tx)),
                handle: tokio::sync::Mutex::new(Some(handle)),
            }),
        })
    }

    pub async fn emit(&self, summary: TargetSummary) -> anyhow::Result<()> {
        let guard = self.inner.tx.lock().await;
        if let Some(tx) = guard.as_ref() {
            tx.send(OutputCommand::Emit(Box::new(summary)))
                .await
                .map_err(|err| anyhow::anyhow!("output worker not available: {err}"))?
        } else {
            anyhow::bail!("output worker not available; dropping target summary");
        }
        Ok(())
    }

    pub async fn shutdown(&self) -> anyhow::Result<()> {
        self.inner.tx.lock().await.take();

        if let Some(handle) = self.inner.handle.lock().await.take() {
            handle
                .await
                .map_err(|err| anyhow::anyhow!("failed to join output worker: {err}"))?;
        }

        Ok(())
    }
}
