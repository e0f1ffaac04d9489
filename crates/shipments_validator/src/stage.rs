//! Pipeline stage abstraction.
//!
//! The pipeline is an ordered list of stages over one shared [`RowStore`].
//! Each stage may first normalize its columns in place and then report the
//! defects it finds; stages never remove rows, and re-running a stage's
//! cleaner on already-cleaned data is a no-op.

use crate::{CellValue, PipelineError, RowStore};
use chrono::NaiveDateTime;
use shipments_core::{Defect, DefectKind, DefectMap, Domain, PolicyConfig};

/// Shared context passed to every validator.
#[derive(Debug, Clone, Copy)]
pub struct StageContext<'a> {
    /// Policy knobs for the run
    pub policy: &'a PolicyConfig,

    /// Processing time used by time-sensitive predicates
    pub now: NaiveDateTime,
}

/// One cleaner/validator pair over a field group.
pub trait PipelineStage {
    /// Stage name used in log events.
    fn name(&self) -> &'static str;

    /// Normalizes the stage's columns in place.
    ///
    /// Default implementation does nothing (validate-only stages).
    fn clean(&self, _table: &mut RowStore) -> Result<(), PipelineError> {
        Ok(())
    }

    /// Reports the stage's defects.
    ///
    /// Default implementation reports nothing (clean-only stages).
    fn validate(
        &self,
        _table: &RowStore,
        _ctx: &StageContext<'_>,
    ) -> Result<Option<(Domain, DefectMap)>, PipelineError> {
        Ok(None)
    }
}

/// Records the given store indices under `kind` when any exist.
pub(crate) fn flag_indices(defects: &mut DefectMap, kind: DefectKind, indices: Vec<usize>) {
    if !indices.is_empty() {
        defects.insert(kind, Defect::at_rows(&indices));
    }
}

/// Collects the store indices where `predicate` holds and records them
/// under `kind` when any exist.
pub(crate) fn flag_where<F>(
    defects: &mut DefectMap,
    kind: DefectKind,
    values: &[&CellValue],
    predicate: F,
) where
    F: Fn(&CellValue) -> bool,
{
    let hits: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| predicate(v))
        .map(|(i, _)| i)
        .collect();
    flag_indices(defects, kind, hits);
}
