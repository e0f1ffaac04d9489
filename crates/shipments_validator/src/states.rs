//! Jurisdiction code cleaning and validation.
//!
//! Origin and destination carry 2-letter US state or Canadian province
//! codes. The cleaner trims and uppercases both columns; the validator
//! flags missing codes, codes outside the US/Canada set (missing codes are
//! outside it too, matching the membership predicate) and codes of the
//! wrong length.

use crate::stage::{flag_where, PipelineStage, StageContext};
use crate::{columns, CellValue, PipelineError, RowStore};
use shipments_core::{DefectKind, DefectMap, Domain};

const US_STATES: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", //
    "HI", "ID", "IL", "IN", "IA", "KS", "KY", "LA", "ME", "MD", //
    "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", //
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", //
    "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY",
];

const CANADIAN_PROVINCES: [&str; 13] = [
    "AB", "BC", "MB", "NB", "NL", "NS", "ON", "PE", "QC", "SK", "NT", "NU", "YT",
];

fn is_valid_code(code: &str) -> bool {
    US_STATES.contains(&code) || CANADIAN_PROVINCES.contains(&code)
}

pub struct StateStage;

impl PipelineStage for StateStage {
    fn name(&self) -> &'static str {
        "states"
    }

    fn clean(&self, table: &mut RowStore) -> Result<(), PipelineError> {
        for column in [columns::ORIGIN_STATE, columns::DEST_STATE] {
            table.update_column(column, |v| match v {
                CellValue::Text(s) => CellValue::Text(s.trim().to_uppercase()),
                other => other.clone(),
            })?;
        }
        Ok(())
    }

    fn validate(
        &self,
        table: &RowStore,
        _ctx: &StageContext<'_>,
    ) -> Result<Option<(Domain, DefectMap)>, PipelineError> {
        let mut defects = DefectMap::new();

        let checks = [
            (
                columns::ORIGIN_STATE,
                DefectKind::OriginNull,
                DefectKind::OriginInvalid,
                DefectKind::OriginLength,
            ),
            (
                columns::DEST_STATE,
                DefectKind::DestNull,
                DefectKind::DestInvalid,
                DefectKind::DestLength,
            ),
        ];

        for (column, null_kind, invalid_kind, length_kind) in checks {
            let values = table.column(column)?;

            flag_where(&mut defects, null_kind, &values, |v| v.is_null());
            flag_where(&mut defects, invalid_kind, &values, |v| {
                !v.as_text().is_some_and(is_valid_code)
            });
            flag_where(&mut defects, length_kind, &values, |v| {
                v.as_text().is_some_and(|s| s.chars().count() != 2)
            });
        }

        Ok(Some((Domain::States, defects)))
    }
}
