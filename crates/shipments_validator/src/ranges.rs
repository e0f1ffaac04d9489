//! Ship and delivery range cleaning and validation.
//!
//! The two range columns each encode a start/end date pair in one string.
//! The cleaner splits them into derived start/end date columns; a split that
//! does not yield exactly two parseable parts leaves null sentinels behind.
//! The validator checks completeness of both derived pairs, ordering within
//! each pair, and that delivery does not start before shipping.

use crate::dates::parse_datetime;
use crate::stage::{flag_indices, PipelineStage, StageContext};
use crate::{columns, CellValue, PipelineError, RowStore};
use shipments_core::{DefectKind, DefectMap, Domain};

/// Splits a range string into its start and end parts.
///
/// The dates themselves may contain hyphens ("2024-01-10 - 2024-01-05"),
/// so the spaced separator wins; a bare `-` split is accepted only when it
/// yields exactly two parts.
fn split_range(text: &str) -> Option<(&str, &str)> {
    let mut spaced = text.splitn(2, " - ");
    if let (Some(start), Some(end)) = (spaced.next(), spaced.next()) {
        return Some((start, end));
    }
    let parts: Vec<&str> = text.split('-').collect();
    match parts.as_slice() {
        [start, end] => Some((start, end)),
        _ => None,
    }
}

fn derive_range(
    table: &mut RowStore,
    source: &str,
    start_column: &str,
    end_column: &str,
) -> Result<(), PipelineError> {
    table.require_column(source)?;
    table.add_column(start_column);
    table.add_column(end_column);

    for index in 0..table.len() {
        let cell = table.value(index, source).clone();
        let (start, end) = match cell.as_text().and_then(split_range) {
            Some((start, end)) => (
                parse_datetime(start)
                    .map(CellValue::DateTime)
                    .unwrap_or(CellValue::Null),
                parse_datetime(end)
                    .map(CellValue::DateTime)
                    .unwrap_or(CellValue::Null),
            ),
            None => (CellValue::Null, CellValue::Null),
        };
        table.set_value(index, start_column, start);
        table.set_value(index, end_column, end);
    }
    Ok(())
}

pub struct RangeStage;

impl PipelineStage for RangeStage {
    fn name(&self) -> &'static str {
        "ranges"
    }

    fn clean(&self, table: &mut RowStore) -> Result<(), PipelineError> {
        derive_range(
            table,
            columns::TARGET_SHIP,
            columns::SHIP_START,
            columns::SHIP_END,
        )?;
        derive_range(
            table,
            columns::TARGET_DELIVERY,
            columns::DELIVERY_START,
            columns::DELIVERY_END,
        )
    }

    fn validate(
        &self,
        table: &RowStore,
        _ctx: &StageContext<'_>,
    ) -> Result<Option<(Domain, DefectMap)>, PipelineError> {
        let ship_starts = table.column(columns::SHIP_START)?;
        let ship_ends = table.column(columns::SHIP_END)?;
        let delivery_starts = table.column(columns::DELIVERY_START)?;
        let delivery_ends = table.column(columns::DELIVERY_END)?;
        let mut defects = DefectMap::new();

        let null_pair = |starts: &[&CellValue], ends: &[&CellValue]| -> Vec<usize> {
            starts
                .iter()
                .zip(ends)
                .enumerate()
                .filter(|(_, (s, e))| s.is_null() || e.is_null())
                .map(|(i, _)| i)
                .collect()
        };
        flag_indices(
            &mut defects,
            DefectKind::NullShipDates,
            null_pair(&ship_starts, &ship_ends),
        );
        flag_indices(
            &mut defects,
            DefectKind::NullDeliveryDates,
            null_pair(&delivery_starts, &delivery_ends),
        );

        let start_after_end = |starts: &[&CellValue], ends: &[&CellValue]| -> Vec<usize> {
            starts
                .iter()
                .zip(ends)
                .enumerate()
                .filter(|(_, (s, e))| {
                    matches!(
                        (s.as_datetime(), e.as_datetime()),
                        (Some(start), Some(end)) if start > end
                    )
                })
                .map(|(i, _)| i)
                .collect()
        };
        flag_indices(
            &mut defects,
            DefectKind::ShipStartAfterEnd,
            start_after_end(&ship_starts, &ship_ends),
        );
        flag_indices(
            &mut defects,
            DefectKind::DeliveryStartAfterEnd,
            start_after_end(&delivery_starts, &delivery_ends),
        );

        let early_delivery: Vec<usize> = delivery_starts
            .iter()
            .zip(&ship_starts)
            .enumerate()
            .filter(|(_, (d, s))| {
                matches!(
                    (d.as_datetime(), s.as_datetime()),
                    (Some(delivery), Some(ship)) if delivery < ship
                )
            })
            .map(|(i, _)| i)
            .collect();
        flag_indices(&mut defects, DefectKind::DeliveryBeforeShipping, early_delivery);

        Ok(Some((Domain::Ranges, defects)))
    }
}
