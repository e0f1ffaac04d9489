//! Weight cleaning and validation.
//!
//! Weights arrive either as numbers or as text with comma grouping
//! separators ("49,500"). The cleaner keeps the original value in a shadow
//! column, strips separators and coerces to a number; anything that does not
//! coerce becomes a null sentinel. The validator distinguishes weights that
//! were always absent from weights that were present but malformed, and
//! applies the overweight rule with the policy's exemption set.

use crate::stage::{flag_indices, flag_where, PipelineStage, StageContext};
use crate::{columns, CellValue, PipelineError, RowStore};
use shipments_core::{DefectKind, DefectMap, Domain};

pub struct WeightStage;

fn coerce_weight(text: &str) -> CellValue {
    match text.replace(',', "").trim().parse::<f64>() {
        Ok(n) => CellValue::Number(n),
        Err(_) => CellValue::Null,
    }
}

impl PipelineStage for WeightStage {
    fn name(&self) -> &'static str {
        "weight"
    }

    fn clean(&self, table: &mut RowStore) -> Result<(), PipelineError> {
        table.require_column(columns::WEIGHT)?;

        // The shadow column is written once; re-runs must not replace the
        // original raw values with already-cleaned ones.
        if !table.has_column(columns::WEIGHT_RAW) {
            table.add_column(columns::WEIGHT_RAW);
            for row in table.rows_mut() {
                let original = row
                    .get(columns::WEIGHT)
                    .cloned()
                    .unwrap_or(CellValue::Null);
                row.insert(columns::WEIGHT_RAW.to_string(), original);
            }
        }

        table.update_column(columns::WEIGHT, |v| match v {
            CellValue::Text(s) => coerce_weight(s),
            CellValue::Number(_) | CellValue::Int(_) | CellValue::Null => v.clone(),
            _ => CellValue::Null,
        })
    }

    fn validate(
        &self,
        table: &RowStore,
        ctx: &StageContext<'_>,
    ) -> Result<Option<(Domain, DefectMap)>, PipelineError> {
        let weights = table.column(columns::WEIGHT)?;
        let raws = table.column(columns::WEIGHT_RAW)?;
        let creators = table.column(columns::CREATE_BY)?;
        let mut defects = DefectMap::new();

        flag_where(&mut defects, DefectKind::NullWeight, &weights, |v| v.is_null());

        let malformed: Vec<usize> = weights
            .iter()
            .enumerate()
            .filter(|(i, w)| w.is_null() && !raws[*i].is_null())
            .map(|(i, _)| i)
            .collect();
        flag_indices(&mut defects, DefectKind::InvalidWeightFormat, malformed);

        flag_where(&mut defects, DefectKind::NonPositive, &weights, |v| {
            v.as_number().is_some_and(|n| n <= 0.0)
        });

        let threshold = ctx.policy.overweight_threshold;
        let overweight: Vec<usize> = weights
            .iter()
            .enumerate()
            .filter(|(i, w)| {
                w.as_number().is_some_and(|n| n >= threshold)
                    && !creators[*i]
                        .as_text()
                        .is_some_and(|c| ctx.policy.is_exempt(c))
            })
            .map(|(i, _)| i)
            .collect();
        flag_indices(&mut defects, DefectKind::Overweight, overweight);

        Ok(Some((Domain::Weight, defects)))
    }
}
