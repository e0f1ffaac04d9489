//! Audit pipeline orchestration.
//!
//! The pipeline composes the stages in their fixed order, threads the row
//! store through them and aggregates every stage's findings into one
//! [`ErrorReport`]. Validators always run to completion, so a single pass
//! yields an exhaustive report; only structural problems (a missing column)
//! abort the run.

use crate::stage::{PipelineStage, StageContext};
use crate::{
    DateStage, PipelineError, RangeStage, ReferenceStage, RowStore, StateStage, StatusStage,
    TextStage, WeightStage,
};
use chrono::{Local, NaiveDateTime};
use shipments_core::{ErrorReport, PolicyConfig};
use std::time::Instant;
use tracing::debug;

/// The audit pipeline: an ordered list of cleaner/validator stages.
///
/// # Example
///
/// ```rust
/// use shipments_core::PolicyConfig;
/// use shipments_validator::{AuditPipeline, RowStore, columns};
///
/// let mut table = RowStore::with_columns([
///     columns::PRIMARY_REFERENCE,
///     columns::STATUS,
///     columns::WEIGHT,
///     columns::CREATE_BY,
///     columns::CREATE_DATE,
///     columns::ORIGIN_STATE,
///     columns::DEST_STATE,
///     columns::ORIGIN_NAME,
///     columns::DEST_NAME,
///     columns::ORIGIN_CITY,
///     columns::DEST_CITY,
///     columns::TARGET_SHIP,
///     columns::TARGET_DELIVERY,
/// ]);
///
/// let pipeline = AuditPipeline::standard();
/// let run = pipeline.run(&mut table, &PolicyConfig::default()).unwrap();
/// assert!(run.report.is_empty());
/// ```
pub struct AuditPipeline {
    stages: Vec<Box<dyn PipelineStage>>,
}

impl AuditPipeline {
    /// Builds the standard pipeline in its fixed stage order.
    pub fn standard() -> Self {
        Self {
            stages: vec![
                Box::new(ReferenceStage),
                Box::new(WeightStage),
                Box::new(DateStage),
                Box::new(StatusStage),
                Box::new(StateStage),
                Box::new(RangeStage),
                Box::new(TextStage),
            ],
        }
    }

    /// Runs every stage and aggregates the findings, using the current
    /// local time for time-sensitive predicates.
    pub fn run(
        &self,
        table: &mut RowStore,
        policy: &PolicyConfig,
    ) -> Result<AuditRun, PipelineError> {
        self.run_at(table, policy, Local::now().naive_local())
    }

    /// Runs the pipeline with an injected processing time.
    pub fn run_at(
        &self,
        table: &mut RowStore,
        policy: &PolicyConfig,
        now: NaiveDateTime,
    ) -> Result<AuditRun, PipelineError> {
        let start = Instant::now();
        let ctx = StageContext { policy, now };
        let mut report = ErrorReport::new();

        for stage in &self.stages {
            stage.clean(table)?;
            if let Some((domain, defects)) = stage.validate(table, &ctx)? {
                debug!(stage = stage.name(), findings = defects.len(), "stage complete");
                report.insert(domain, defects);
            } else {
                debug!(stage = stage.name(), "stage complete");
            }
        }

        Ok(AuditRun {
            report,
            stats: AuditStats {
                records_audited: table.len(),
                stages_run: self.stages.len(),
                duration_ms: start.elapsed().as_millis() as u64,
            },
        })
    }
}

impl Default for AuditPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// Result of one audit pass, before gate enforcement.
#[derive(Debug, Clone)]
pub struct AuditRun {
    /// The aggregated defect report
    pub report: ErrorReport,

    /// Execution statistics
    pub stats: AuditStats,
}

/// Statistics about pipeline execution.
#[derive(Debug, Clone, Default)]
pub struct AuditStats {
    /// Number of records audited
    pub records_audited: usize,

    /// Number of stages run
    pub stages_run: usize,

    /// Pipeline duration in milliseconds
    pub duration_ms: u64,
}
