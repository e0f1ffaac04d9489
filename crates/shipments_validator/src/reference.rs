//! Primary reference cleaning and validation.
//!
//! The primary reference is the intended-unique shipment identifier. The
//! cleaner trims surrounding whitespace; the validator flags missing, empty
//! and duplicated identifiers (every occurrence of a duplicate is flagged,
//! not just the repeats).

use crate::stage::{flag_indices, flag_where, PipelineStage, StageContext};
use crate::{columns, CellValue, PipelineError, RowStore};
use shipments_core::{DefectKind, DefectMap, Domain};
use std::collections::HashMap;

pub struct ReferenceStage;

impl PipelineStage for ReferenceStage {
    fn name(&self) -> &'static str {
        "primary_reference"
    }

    fn clean(&self, table: &mut RowStore) -> Result<(), PipelineError> {
        table.update_column(columns::PRIMARY_REFERENCE, |v| match v {
            CellValue::Text(s) => CellValue::Text(s.trim().to_string()),
            other => other.clone(),
        })
    }

    fn validate(
        &self,
        table: &RowStore,
        _ctx: &StageContext<'_>,
    ) -> Result<Option<(Domain, DefectMap)>, PipelineError> {
        let values = table.column(columns::PRIMARY_REFERENCE)?;
        let mut defects = DefectMap::new();

        flag_where(&mut defects, DefectKind::NullPrimaryReference, &values, |v| {
            v.is_null()
        });
        flag_where(&mut defects, DefectKind::EmptyPrimaryReference, &values, |v| {
            v.as_text() == Some("")
        });

        // Null identifiers are already reported above; duplicates are
        // detected over the textual values only.
        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for value in &values {
            if let Some(text) = value.as_text() {
                *occurrences.entry(text).or_default() += 1;
            }
        }
        let duplicates: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.as_text().is_some_and(|t| occurrences[t] > 1))
            .map(|(i, _)| i)
            .collect();
        flag_indices(&mut defects, DefectKind::DuplicatePrimaryReference, duplicates);

        Ok(Some((Domain::PrimaryReference, defects)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipments_core::PolicyConfig;

    fn reference_store(values: &[CellValue]) -> RowStore {
        let mut store = RowStore::with_columns([columns::PRIMARY_REFERENCE]);
        for value in values {
            store.push_row(
                [(columns::PRIMARY_REFERENCE.to_string(), value.clone())].into(),
            );
        }
        store
    }

    fn validate(store: &RowStore) -> DefectMap {
        let policy = PolicyConfig::default();
        let ctx = StageContext {
            policy: &policy,
            now: chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        };
        let (domain, defects) = ReferenceStage.validate(store, &ctx).unwrap().unwrap();
        assert_eq!(domain, Domain::PrimaryReference);
        defects
    }

    #[test]
    fn test_clean_trims_whitespace() {
        let mut store = reference_store(&[CellValue::from("  LOAD-1  "), CellValue::Null]);
        ReferenceStage.clean(&mut store).unwrap();
        assert_eq!(
            store.value(0, columns::PRIMARY_REFERENCE).as_text(),
            Some("LOAD-1")
        );
        assert!(store.value(1, columns::PRIMARY_REFERENCE).is_null());
    }

    #[test]
    fn test_null_and_empty_references() {
        let store = reference_store(&[
            CellValue::from("LOAD-1"),
            CellValue::Null,
            CellValue::from(""),
        ]);
        let defects = validate(&store);

        assert_eq!(defects[&DefectKind::NullPrimaryReference].rows, vec![3]);
        assert_eq!(defects[&DefectKind::EmptyPrimaryReference].rows, vec![4]);
        assert!(!defects.contains_key(&DefectKind::DuplicatePrimaryReference));
    }

    #[test]
    fn test_duplicates_flag_every_occurrence() {
        let store = reference_store(&[
            CellValue::from("LOAD-1"),
            CellValue::from("LOAD-2"),
            CellValue::from("LOAD-1"),
        ]);
        let defects = validate(&store);

        let duplicate = &defects[&DefectKind::DuplicatePrimaryReference];
        assert_eq!(duplicate.count, 2);
        assert_eq!(duplicate.rows, vec![2, 4]);
    }

    #[test]
    fn test_null_references_are_not_duplicates() {
        let store = reference_store(&[CellValue::Null, CellValue::Null]);
        let defects = validate(&store);

        assert_eq!(defects[&DefectKind::NullPrimaryReference].count, 2);
        assert!(!defects.contains_key(&DefectKind::DuplicatePrimaryReference));
    }
}
