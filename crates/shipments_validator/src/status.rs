//! Status validation.
//!
//! Status is an enumerated field; anything outside the allowed set, missing
//! values included, is advisory-flagged. There is no cleaner for this
//! domain.

use crate::stage::{flag_where, PipelineStage, StageContext};
use crate::{columns, PipelineError, RowStore};
use shipments_core::{DefectKind, DefectMap, Domain};

/// Statuses accepted for a shipment record.
const VALID_STATUSES: [&str; 2] = ["Booked", "In Transit"];

pub struct StatusStage;

impl PipelineStage for StatusStage {
    fn name(&self) -> &'static str {
        "status"
    }

    fn validate(
        &self,
        table: &RowStore,
        _ctx: &StageContext<'_>,
    ) -> Result<Option<(Domain, DefectMap)>, PipelineError> {
        let values = table.column(columns::STATUS)?;
        let mut defects = DefectMap::new();

        flag_where(&mut defects, DefectKind::InvalidStatus, &values, |v| {
            !v.as_text().is_some_and(|s| VALID_STATUSES.contains(&s))
        });

        Ok(Some((Domain::Status, defects)))
    }
}
