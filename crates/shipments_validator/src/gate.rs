//! Policy gate: defect classification and enforcement.
//!
//! The gate is the last word on a report. Every defect is emitted to the
//! log sink with its full row positions; kinds in the policy's critical set
//! additionally fail the pipeline with a one-line summary. Advisory defects
//! are recorded and swallowed.

use crate::PipelineError;
use shipments_core::{DefectKind, Domain, ErrorReport, PolicyConfig};
use tracing::error;

/// Classifies a report's defects against the policy and enforces it.
pub struct PolicyGate {
    policy: PolicyConfig,
}

impl PolicyGate {
    /// Creates a gate for the given policy.
    pub fn new(policy: PolicyConfig) -> Self {
        Self { policy }
    }

    /// Returns the gate's policy.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Logs every defect and fails when any critical kind is present.
    ///
    /// The failure message enumerates each critical (domain, kind, count)
    /// triple in report order; row positions stay in the log sink.
    pub fn enforce(&self, report: &ErrorReport) -> Result<(), PipelineError> {
        let mut critical: Vec<(Domain, DefectKind, usize)> = Vec::new();

        for (domain, defects) in report.iter() {
            for (kind, defect) in defects {
                error!(
                    domain = %domain,
                    kind = %kind,
                    count = defect.count,
                    rows = ?defect.rows,
                    "data quality defect"
                );
                if self.policy.is_critical(*kind) {
                    critical.push((domain, *kind, defect.count));
                }
            }
        }

        if critical.is_empty() {
            return Ok(());
        }

        let summary = critical
            .iter()
            .map(|(domain, kind, count)| format!("{domain}.{kind} ({count} rows)"))
            .collect::<Vec<_>>()
            .join(", ");
        Err(PipelineError::CriticalDefects(summary))
    }
}
