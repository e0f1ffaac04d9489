//! Create date cleaning and validation.
//!
//! The cleaner parses the create timestamp column into a real date/time
//! value; text that matches none of the accepted formats becomes a null
//! sentinel. The validator flags missing dates, dates after the processing
//! time, and dates before the policy cutoff (strictly before: a date equal
//! to the cutoff passes).

use crate::stage::{flag_where, PipelineStage, StageContext};
use crate::{columns, CellValue, PipelineError, RowStore};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use shipments_core::{DefectKind, DefectMap, Domain};

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Parses a date or date/time string in any accepted format. Date-only
/// strings land at midnight.
pub(crate) fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(text, format) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

pub struct DateStage;

impl PipelineStage for DateStage {
    fn name(&self) -> &'static str {
        "create_date"
    }

    fn clean(&self, table: &mut RowStore) -> Result<(), PipelineError> {
        table.update_column(columns::CREATE_DATE, |v| match v {
            CellValue::Text(s) => parse_datetime(s)
                .map(CellValue::DateTime)
                .unwrap_or(CellValue::Null),
            CellValue::DateTime(_) | CellValue::Null => v.clone(),
            _ => CellValue::Null,
        })
    }

    fn validate(
        &self,
        table: &RowStore,
        ctx: &StageContext<'_>,
    ) -> Result<Option<(Domain, DefectMap)>, PipelineError> {
        let values = table.column(columns::CREATE_DATE)?;
        let mut defects = DefectMap::new();

        flag_where(&mut defects, DefectKind::NullDate, &values, |v| v.is_null());

        let now = ctx.now;
        flag_where(&mut defects, DefectKind::FutureDate, &values, |v| {
            v.as_datetime().is_some_and(|dt| dt > now)
        });

        let cutoff = ctx.policy.earliest_create_date.and_time(NaiveTime::MIN);
        flag_where(&mut defects, DefectKind::TooOld, &values, |v| {
            v.as_datetime().is_some_and(|dt| dt < cutoff)
        });

        Ok(Some((Domain::CreateDate, defects)))
    }
}
