//! Defect report types.
//!
//! This module contains the vocabulary of data-quality findings: the domains
//! the pipeline is organized around, the fixed set of defect kinds, and the
//! two-level report that one audit pass produces.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Offset between a 0-based store row index and the row number of the same
/// record in the source file: one header row plus 1-based numbering.
pub const FILE_ROW_OFFSET: usize = 2;

/// A logical field group handled by one cleaner/validator pair.
///
/// Declaration order is pipeline order; reports iterate domains in this
/// order, so gate summaries come out in encounter order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// The intended-unique shipment identifier
    PrimaryReference,
    /// Shipment weight and the overweight exemption rules
    Weight,
    /// The record creation timestamp
    CreateDate,
    /// The enumerated shipment status
    Status,
    /// Origin and destination jurisdiction codes
    States,
    /// Target ship and target delivery date ranges
    Ranges,
}

impl Domain {
    /// Returns the report key for this domain.
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::PrimaryReference => "primary_reference",
            Domain::Weight => "weight",
            Domain::CreateDate => "create_date",
            Domain::Status => "status",
            Domain::States => "states",
            Domain::Ranges => "ranges",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed set of defect kinds the validators can report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DefectKind {
    /// Primary reference is missing
    NullPrimaryReference,
    /// Primary reference is the empty string
    EmptyPrimaryReference,
    /// Primary reference occurs on more than one row
    DuplicatePrimaryReference,
    /// Status outside the allowed set
    InvalidStatus,
    /// Cleaned weight is missing
    NullWeight,
    /// Raw weight was present but did not coerce to a number
    InvalidWeightFormat,
    /// Cleaned weight is zero or negative
    NonPositive,
    /// Weight at or above the threshold without an exempt creator
    Overweight,
    /// Cleaned create date is missing
    NullDate,
    /// Create date is after the processing time
    FutureDate,
    /// Create date is before the configured cutoff
    TooOld,
    /// Origin state code is missing
    OriginNull,
    /// Destination state code is missing
    DestNull,
    /// Origin state code outside the US/Canada set
    OriginInvalid,
    /// Destination state code outside the US/Canada set
    DestInvalid,
    /// Origin state code length is not 2
    OriginLength,
    /// Destination state code length is not 2
    DestLength,
    /// Ship range start or end failed to derive
    NullShipDates,
    /// Delivery range start or end failed to derive
    NullDeliveryDates,
    /// Ship range start after its end
    ShipStartAfterEnd,
    /// Delivery range start after its end
    DeliveryStartAfterEnd,
    /// Delivery starts before shipping does
    DeliveryBeforeShipping,
}

impl DefectKind {
    /// Returns the report tag for this defect kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DefectKind::NullPrimaryReference => "null_primary_reference",
            DefectKind::EmptyPrimaryReference => "empty_primary_reference",
            DefectKind::DuplicatePrimaryReference => "duplicate_primary_reference",
            DefectKind::InvalidStatus => "invalid_status",
            DefectKind::NullWeight => "null_weight",
            DefectKind::InvalidWeightFormat => "invalid_weight_format",
            DefectKind::NonPositive => "non_positive",
            DefectKind::Overweight => "overweight",
            DefectKind::NullDate => "null_date",
            DefectKind::FutureDate => "future_date",
            DefectKind::TooOld => "too_old",
            DefectKind::OriginNull => "origin_null",
            DefectKind::DestNull => "dest_null",
            DefectKind::OriginInvalid => "origin_invalid",
            DefectKind::DestInvalid => "dest_invalid",
            DefectKind::OriginLength => "origin_length",
            DefectKind::DestLength => "dest_length",
            DefectKind::NullShipDates => "null_ship_dates",
            DefectKind::NullDeliveryDates => "null_delivery_dates",
            DefectKind::ShipStartAfterEnd => "ship_start_after_end",
            DefectKind::DeliveryStartAfterEnd => "delivery_start_after_end",
            DefectKind::DeliveryBeforeShipping => "delivery_before_shipping",
        }
    }
}

impl fmt::Display for DefectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected defect: how many records it affects and where they sit in
/// the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defect {
    /// Number of affected records
    pub count: usize,

    /// Source-file row numbers of the affected records
    pub rows: Vec<usize>,
}

impl Defect {
    /// Builds a defect from 0-based store row indices, translating each to
    /// its source-file row number.
    pub fn at_rows(indices: &[usize]) -> Self {
        let rows: Vec<usize> = indices.iter().map(|i| i + FILE_ROW_OFFSET).collect();
        Self {
            count: rows.len(),
            rows,
        }
    }
}

/// Defects found within one domain, keyed by kind.
pub type DefectMap = BTreeMap<DefectKind, Defect>;

/// The aggregated result of one audit pass: domain -> defect kind -> defect.
///
/// Domains with no findings are omitted. Iteration follows pipeline order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    domains: BTreeMap<Domain, DefectMap>,
}

impl ErrorReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the findings of one domain. Empty findings are dropped.
    pub fn insert(&mut self, domain: Domain, defects: DefectMap) {
        if !defects.is_empty() {
            self.domains.insert(domain, defects);
        }
    }

    /// Looks up a single defect.
    pub fn get(&self, domain: Domain, kind: DefectKind) -> Option<&Defect> {
        self.domains.get(&domain)?.get(&kind)
    }

    /// Returns the findings of one domain, if any.
    pub fn domain(&self, domain: Domain) -> Option<&DefectMap> {
        self.domains.get(&domain)
    }

    /// Returns true if no defects were found.
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Total number of distinct (domain, kind) findings.
    pub fn total_defects(&self) -> usize {
        self.domains.values().map(|d| d.len()).sum()
    }

    /// Iterates domains and their findings in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (Domain, &DefectMap)> {
        self.domains.iter().map(|(d, m)| (*d, m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defect_row_offset() {
        let defect = Defect::at_rows(&[0, 2, 4]);
        assert_eq!(defect.count, 3);
        assert_eq!(defect.rows, vec![2, 4, 6]);
    }

    #[test]
    fn test_empty_findings_dropped() {
        let mut report = ErrorReport::new();
        report.insert(Domain::Weight, DefectMap::new());
        assert!(report.is_empty());
        assert_eq!(report.total_defects(), 0);
    }

    #[test]
    fn test_report_iterates_in_pipeline_order() {
        let mut report = ErrorReport::new();
        report.insert(
            Domain::Ranges,
            [(DefectKind::NullShipDates, Defect::at_rows(&[1]))].into(),
        );
        report.insert(
            Domain::Weight,
            [(DefectKind::NullWeight, Defect::at_rows(&[0]))].into(),
        );
        report.insert(
            Domain::PrimaryReference,
            [(DefectKind::EmptyPrimaryReference, Defect::at_rows(&[2]))].into(),
        );

        let order: Vec<Domain> = report.iter().map(|(d, _)| d).collect();
        assert_eq!(
            order,
            vec![Domain::PrimaryReference, Domain::Weight, Domain::Ranges]
        );
    }

    #[test]
    fn test_tags_are_snake_case() {
        assert_eq!(Domain::PrimaryReference.to_string(), "primary_reference");
        assert_eq!(DefectKind::ShipStartAfterEnd.to_string(), "ship_start_after_end");
        assert_eq!(
            serde_json::to_string(&DefectKind::NullWeight).unwrap(),
            "\"null_weight\""
        );
    }

    #[test]
    fn test_report_serializes_with_domain_keys() {
        let mut report = ErrorReport::new();
        report.insert(
            Domain::Weight,
            [(DefectKind::Overweight, Defect::at_rows(&[5]))].into(),
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["domains"]["weight"]["overweight"]["count"], 1);
        assert_eq!(json["domains"]["weight"]["overweight"]["rows"][0], 7);
    }
}
