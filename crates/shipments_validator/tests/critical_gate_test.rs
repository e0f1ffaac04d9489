//! Tests for policy gate enforcement over full pipeline runs.
//!
//! The gate must fail the pipeline whenever a critical defect kind appears
//! anywhere in the report, with a summary enumerating every critical
//! finding, while advisory-only reports complete normally.

use chrono::{NaiveDate, NaiveDateTime};
use shipments_core::{DefectKind, ErrorReport, PolicyBuilder, PolicyConfig};
use shipments_validator::{columns, AuditPipeline, CellValue, PipelineError, PolicyGate, Row, RowStore};

const ALL_COLUMNS: [&str; 13] = [
    columns::PRIMARY_REFERENCE,
    columns::STATUS,
    columns::WEIGHT,
    columns::CREATE_BY,
    columns::CREATE_DATE,
    columns::ORIGIN_STATE,
    columns::DEST_STATE,
    columns::ORIGIN_NAME,
    columns::DEST_NAME,
    columns::ORIGIN_CITY,
    columns::DEST_CITY,
    columns::TARGET_SHIP,
    columns::TARGET_DELIVERY,
];

fn record(overrides: &[(&str, CellValue)]) -> Row {
    let mut row = Row::from([
        (
            columns::PRIMARY_REFERENCE.to_string(),
            CellValue::from("LOAD-1"),
        ),
        (columns::STATUS.to_string(), CellValue::from("Booked")),
        (columns::WEIGHT.to_string(), CellValue::from("12,500")),
        (
            columns::CREATE_BY.to_string(),
            CellValue::from("dispatch@company.com"),
        ),
        (
            columns::CREATE_DATE.to_string(),
            CellValue::from("2024-03-01"),
        ),
        (columns::ORIGIN_STATE.to_string(), CellValue::from("TX")),
        (columns::DEST_STATE.to_string(), CellValue::from("ON")),
        (columns::ORIGIN_NAME.to_string(), CellValue::from("Acme")),
        (columns::DEST_NAME.to_string(), CellValue::from("Acme East")),
        (columns::ORIGIN_CITY.to_string(), CellValue::from("Dallas")),
        (columns::DEST_CITY.to_string(), CellValue::from("Toronto")),
        (
            columns::TARGET_SHIP.to_string(),
            CellValue::from("2024-03-05 - 2024-03-08"),
        ),
        (
            columns::TARGET_DELIVERY.to_string(),
            CellValue::from("2024-03-09 - 2024-03-12"),
        ),
    ]);
    for (column, value) in overrides {
        row.insert(column.to_string(), value.clone());
    }
    row
}

fn processing_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn audit(rows: Vec<Row>) -> ErrorReport {
    let mut table = RowStore::with_columns(ALL_COLUMNS);
    for row in rows {
        table.push_row(row);
    }
    AuditPipeline::standard()
        .run_at(&mut table, &PolicyConfig::default(), processing_time())
        .unwrap()
        .report
}

#[test]
fn test_missing_weight_fails_the_gate() {
    let report = audit(vec![
        record(&[]),
        record(&[
            (columns::PRIMARY_REFERENCE, CellValue::from("LOAD-2")),
            (columns::WEIGHT, CellValue::Null),
        ]),
    ]);

    let gate = PolicyGate::new(PolicyConfig::default());
    let err = gate.enforce(&report).unwrap_err();

    assert!(matches!(err, PipelineError::CriticalDefects(_)));
    assert!(err.to_string().contains("weight.null_weight (1 rows)"));
}

#[test]
fn test_advisory_only_report_passes_the_gate() {
    // Wrong status and an out-of-set state are advisory: recorded, never
    // blocking.
    let report = audit(vec![record(&[
        (columns::STATUS, CellValue::from("Delivered")),
        (columns::ORIGIN_STATE, CellValue::from("ZZ")),
    ])]);

    assert!(!report.is_empty());
    let gate = PolicyGate::new(PolicyConfig::default());
    assert!(gate.enforce(&report).is_ok());
}

#[test]
fn test_summary_covers_every_critical_finding() {
    let report = audit(vec![
        record(&[(columns::PRIMARY_REFERENCE, CellValue::Null)]),
        record(&[
            (columns::PRIMARY_REFERENCE, CellValue::from("LOAD-2")),
            (columns::CREATE_DATE, CellValue::from("2031-01-01")),
        ]),
        record(&[
            (columns::PRIMARY_REFERENCE, CellValue::from("LOAD-3")),
            (columns::WEIGHT, CellValue::Null),
        ]),
    ]);

    let gate = PolicyGate::new(PolicyConfig::default());
    let message = gate.enforce(&report).unwrap_err().to_string();

    assert!(message.contains("primary_reference.null_primary_reference (1 rows)"));
    assert!(message.contains("weight.null_weight (1 rows)"));
    assert!(message.contains("create_date.future_date (1 rows)"));
}

#[test]
fn test_injected_policy_reclassifies_kinds() {
    let report = audit(vec![record(&[(columns::STATUS, CellValue::from("Lost"))])]);

    // invalid_status is advisory by default but a deployment can promote it.
    let strict = PolicyBuilder::new()
        .critical_kind(DefectKind::InvalidStatus)
        .build();
    let err = PolicyGate::new(strict).enforce(&report).unwrap_err();
    assert!(err.to_string().contains("status.invalid_status (1 rows)"));
}

#[test]
fn test_empty_batch_passes() {
    let report = audit(Vec::new());
    assert!(report.is_empty());
    assert!(PolicyGate::new(PolicyConfig::default()).enforce(&report).is_ok());
}
