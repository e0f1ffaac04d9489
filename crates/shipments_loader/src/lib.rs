//! Tabular file loader for shipment batches.
//!
//! Reads a spreadsheet-style file into the validator's [`RowStore`]. The
//! first row is the header and becomes the store's column list; every data
//! row maps header columns to typed cells. Two source formats are
//! supported, dispatched by file extension:
//!
//! - Excel workbooks (`.xlsx`, `.xlsm`, `.xls`) via `calamine`, first
//!   worksheet only
//! - Delimited text (`.csv`) via the `csv` crate
//!
//! Load failures are fatal: a file the loader cannot read is a schema
//! problem, not a data-quality defect.

use calamine::{open_workbook_auto, Data, DataType, Reader};
use shipments_validator::{CellValue, Row, RowStore};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while loading a batch file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Workbook could not be opened or read
    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// CSV could not be parsed
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The workbook contains no worksheet
    #[error("Workbook has no worksheet")]
    NoWorksheet,

    /// The file has no header row
    #[error("Input has no header row")]
    MissingHeader,

    /// Unsupported file format
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Supported batch file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Excel workbook (.xlsx, .xlsm, .xls)
    Excel,
    /// Delimited text (.csv)
    Csv,
}

/// Detect the source format from a file path based on its extension.
pub fn detect_format(path: &Path) -> Result<SourceFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(LoadError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "xlsx" | "xlsm" | "xls" => Ok(SourceFormat::Excel),
        "csv" => Ok(SourceFormat::Csv),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

/// Load a batch file into a row store with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use shipments_loader::load_file;
/// use std::path::Path;
///
/// let table = load_file(Path::new("batches/monday.xlsx")).unwrap();
/// println!("Loaded {} records", table.len());
/// ```
pub fn load_file(path: &Path) -> Result<RowStore> {
    let table = match detect_format(path)? {
        SourceFormat::Excel => load_excel(path),
        SourceFormat::Csv => load_csv(path),
    }?;
    info!(
        path = %path.display(),
        records = table.len(),
        columns = table.columns().len(),
        "batch loaded"
    );
    Ok(table)
}

/// Reads the first worksheet of an Excel workbook.
fn load_excel(path: &Path) -> Result<RowStore> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::NoWorksheet)??;

    let mut rows = range.rows();
    let header = rows.next().ok_or(LoadError::MissingHeader)?;
    let columns: Vec<String> = header
        .iter()
        .map(|cell| cell.as_string().unwrap_or_default().trim().to_string())
        .collect();

    let mut table = RowStore::with_columns(columns.clone());
    for row in rows {
        let mut record = Row::new();
        for (column, cell) in columns.iter().zip(row) {
            record.insert(column.clone(), excel_cell(cell));
        }
        table.push_row(record);
    }
    Ok(table)
}

/// Converts one Excel cell into a typed value.
fn excel_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or(CellValue::Null),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Null,
    }
}

/// Reads a delimited text file. Every field is text; empty fields are null.
fn load_csv(path: &Path) -> Result<RowStore> {
    let mut reader = csv::Reader::from_path(path)?;

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if columns.is_empty() {
        return Err(LoadError::MissingHeader);
    }

    let mut table = RowStore::with_columns(columns.clone());
    for result in reader.records() {
        let record = result?;
        let mut row = Row::new();
        for (column, field) in columns.iter().zip(record.iter()) {
            let value = if field.is_empty() {
                CellValue::Null
            } else {
                CellValue::Text(field.to_string())
            };
            row.insert(column.clone(), value);
        }
        table.push_row(row);
    }
    Ok(table)
}
