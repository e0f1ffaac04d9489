//! Row store for shipment batches.
//!
//! This module provides the in-memory table the pipeline operates on: one
//! row per shipment with named cells. Cleaners rewrite cells in place or add
//! derived columns; validators only read. The row count never changes once
//! the store is loaded.

use crate::PipelineError;
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Column names of a shipment batch.
pub mod columns {
    pub const PRIMARY_REFERENCE: &str = "Primary Reference";
    pub const STATUS: &str = "Status";
    pub const WEIGHT: &str = "Weight";
    pub const CREATE_BY: &str = "Create By";
    pub const CREATE_DATE: &str = "Create Date";
    pub const ORIGIN_STATE: &str = "Origin State";
    pub const DEST_STATE: &str = "Dest State";
    pub const ORIGIN_NAME: &str = "Origin Name";
    pub const DEST_NAME: &str = "Dest Name";
    pub const ORIGIN_CITY: &str = "Origin City";
    pub const DEST_CITY: &str = "Dest City";
    pub const TARGET_SHIP: &str = "Target Ship (Range)";
    pub const TARGET_DELIVERY: &str = "Target Delivery (Range)";

    // Derived by cleaners
    pub const WEIGHT_RAW: &str = "Weight Raw";
    pub const SHIP_START: &str = "Ship Start";
    pub const SHIP_END: &str = "Ship End";
    pub const DELIVERY_START: &str = "Delivery Start";
    pub const DELIVERY_END: &str = "Delivery End";
}

/// A value in a cell.
///
/// `Null` doubles as the sentinel for "could not be parsed": cleaners that
/// fail to coerce a value write `Null` rather than erroring.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing or unparseable value
    Null,
    /// String value
    Text(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// Date/time value
    DateTime(NaiveDateTime),
}

static NULL_CELL: CellValue = CellValue::Null;

impl CellValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Text(_) => "text",
            CellValue::Int(_) => "int",
            CellValue::Number(_) => "number",
            CellValue::Bool(_) => "bool",
            CellValue::DateTime(_) => "datetime",
        }
    }

    /// Attempts to get this value as a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as a number. Integers coerce.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as a date/time.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Renders a non-null value the way it would appear in a text cell.
    pub fn display_string(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Int(i) => Some(i.to_string()),
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::DateTime(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

/// A single row of a batch.
pub type Row = HashMap<String, CellValue>;

/// An in-memory shipment batch: an ordered column list and its rows.
///
/// A cell a row does not carry reads as [`CellValue::Null`], so loaders may
/// omit empty trailing cells and cleaners may register derived columns
/// without backfilling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowStore {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl RowStore {
    /// Creates a new empty store with no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a store with the given header columns and no rows.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Returns the header columns in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns true if the store carries the named column.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Registers a derived column. Existing rows read as null until written.
    pub fn add_column(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.has_column(&name) {
            self.columns.push(name);
        }
    }

    /// Fails unless the named column is present.
    pub fn require_column(&self, name: &str) -> Result<(), PipelineError> {
        if self.has_column(name) {
            Ok(())
        } else {
            Err(PipelineError::missing_column(name))
        }
    }

    /// Appends a row to the store.
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the store has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Returns a mutable iterator over the rows.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut Row> {
        self.rows.iter_mut()
    }

    /// Gets a specific row by index.
    pub fn get_row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Reads one cell. Absent cells read as null.
    pub fn value(&self, index: usize, column: &str) -> &CellValue {
        self.rows
            .get(index)
            .and_then(|row| row.get(column))
            .unwrap_or(&NULL_CELL)
    }

    /// Writes one cell. Out-of-range indices are ignored.
    pub fn set_value(&mut self, index: usize, column: &str, value: CellValue) {
        if let Some(row) = self.rows.get_mut(index) {
            row.insert(column.to_string(), value);
        }
    }

    /// Returns the column's value for every row, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&CellValue>, PipelineError> {
        self.require_column(name)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(name).unwrap_or(&NULL_CELL))
            .collect())
    }

    /// Rewrites a column in place, one cell at a time.
    pub fn update_column<F>(&mut self, name: &str, mut f: F) -> Result<(), PipelineError>
    where
        F: FnMut(&CellValue) -> CellValue,
    {
        self.require_column(name)?;
        for row in &mut self.rows {
            let current = row.get(name).unwrap_or(&NULL_CELL);
            let updated = f(current);
            row.insert(name.to_string(), updated);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_with_one_column() -> RowStore {
        let mut store = RowStore::with_columns(["Weight"]);
        store.push_row(Row::from([("Weight".to_string(), CellValue::from("1,000"))]));
        store.push_row(Row::new());
        store
    }

    #[test]
    fn test_empty_store() {
        let store = RowStore::empty();
        assert!(store.is_empty());
        assert!(store.columns().is_empty());
        assert!(!store.has_column("Weight"));
    }

    #[test]
    fn test_cell_value_types() {
        assert_eq!(CellValue::Null.type_name(), "null");
        assert_eq!(CellValue::from("x").type_name(), "text");
        assert_eq!(CellValue::from(42i64).type_name(), "int");
        assert_eq!(CellValue::from(3.5).type_name(), "number");
    }

    #[test]
    fn test_cell_value_conversions() {
        let val = CellValue::from("hello");
        assert_eq!(val.as_text(), Some("hello"));
        assert_eq!(val.as_number(), None);

        let val = CellValue::Int(42);
        assert_eq!(val.as_number(), Some(42.0));
        assert_eq!(val.as_text(), None);
        assert_eq!(val.display_string().as_deref(), Some("42"));
        assert_eq!(CellValue::Null.display_string(), None);
    }

    #[test]
    fn test_absent_cell_reads_as_null() {
        let store = store_with_one_column();
        assert_eq!(store.value(0, "Weight").as_text(), Some("1,000"));
        assert!(store.value(1, "Weight").is_null());
        assert!(store.value(9, "Weight").is_null());
    }

    #[test]
    fn test_column_requires_presence() {
        let store = store_with_one_column();
        let values = store.column("Weight").unwrap();
        assert_eq!(values.len(), 2);
        assert!(matches!(
            store.column("Status"),
            Err(PipelineError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_update_column_preserves_row_count() {
        let mut store = store_with_one_column();
        store
            .update_column("Weight", |v| match v {
                CellValue::Text(s) => CellValue::Text(s.replace(',', "")),
                other => other.clone(),
            })
            .unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.value(0, "Weight").as_text(), Some("1000"));
        assert!(store.value(1, "Weight").is_null());
    }

    #[test]
    fn test_add_column_is_idempotent() {
        let mut store = store_with_one_column();
        store.add_column("Ship Start");
        store.add_column("Ship Start");
        assert_eq!(store.columns(), ["Weight", "Ship Start"]);
        assert!(store.value(0, "Ship Start").is_null());
    }
}
