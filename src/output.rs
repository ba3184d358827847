mod channel;
mod sink;

pub use channel::OutputChannel;
pub use sink::OutputSink;

use crate::policy::Verdict;
use crate::report::{CapabilityReport, CategoryView};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything emitted for one scanned target.
#[derive(Debug, Clone, Serialize)]
pub struct TargetSummary {
    pub node: String,
    pub scanned_at: DateTime<Utc>,
    pub report: CapabilityReport,
    pub categories: CategoryView,
    pub verdicts: Vec<Verdict>,
}

impl TargetSummary {
    pub fn new(node: impl Into<String>, report: CapabilityReport, verdicts: Vec<Verdict>) -> Self {
        Self {
            node: node.into(),
            scanned_at: Utc::now(),
            categories: report.categories(),
            report,
            verdicts,
        }
    }

    pub fn failed(&self) -> bool {
        self.verdicts.iter().any(Verdict::is_mandatory_failure)
    }
}
