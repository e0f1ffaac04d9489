//! Free-text column normalization.
//!
//! Names and cities are matched downstream case-insensitively, so the final
//! stage trims and uppercases them. Non-text scalars are rendered to their
//! display string first; null cells stay null. Clean-only: no validator.

use crate::stage::PipelineStage;
use crate::{columns, CellValue, PipelineError, RowStore};

/// Columns normalized by this stage.
const TEXT_COLUMNS: [&str; 4] = [
    columns::ORIGIN_NAME,
    columns::DEST_NAME,
    columns::ORIGIN_CITY,
    columns::DEST_CITY,
];

pub struct TextStage;

impl PipelineStage for TextStage {
    fn name(&self) -> &'static str {
        "text"
    }

    fn clean(&self, table: &mut RowStore) -> Result<(), PipelineError> {
        for column in TEXT_COLUMNS {
            table.update_column(column, |v| match v.display_string() {
                Some(s) => CellValue::Text(s.trim().to_uppercase()),
                None => CellValue::Null,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text_store(name: CellValue) -> RowStore {
        let mut store = RowStore::with_columns(TEXT_COLUMNS);
        store.push_row(
            [
                (columns::ORIGIN_NAME.to_string(), name),
                (columns::DEST_NAME.to_string(), CellValue::from("acme corp")),
                (columns::ORIGIN_CITY.to_string(), CellValue::from(" Dallas ")),
                (columns::DEST_CITY.to_string(), CellValue::Null),
            ]
            .into(),
        );
        store
    }

    #[test]
    fn test_text_columns_trimmed_and_uppercased() {
        let mut store = text_store(CellValue::from("  Acme Logistics "));
        TextStage.clean(&mut store).unwrap();

        assert_eq!(
            store.value(0, columns::ORIGIN_NAME).as_text(),
            Some("ACME LOGISTICS")
        );
        assert_eq!(store.value(0, columns::DEST_NAME).as_text(), Some("ACME CORP"));
        assert_eq!(store.value(0, columns::ORIGIN_CITY).as_text(), Some("DALLAS"));
    }

    #[test]
    fn test_nulls_stay_null_and_numbers_stringify() {
        let mut store = text_store(CellValue::Int(4170));
        TextStage.clean(&mut store).unwrap();

        assert_eq!(store.value(0, columns::ORIGIN_NAME).as_text(), Some("4170"));
        assert!(store.value(0, columns::DEST_CITY).is_null());
    }

    #[test]
    fn test_clean_is_idempotent() {
        let mut store = text_store(CellValue::from("  Acme Logistics "));
        TextStage.clean(&mut store).unwrap();
        let once = store.clone();
        TextStage.clean(&mut store).unwrap();
        assert_eq!(store, once);
    }
}
