//! Policy configuration for the audit pipeline.
//!
//! The policy holds every per-deployment knob the validators and the gate
//! consume: which defect kinds are critical, who may book overweight
//! shipments, the overweight threshold and the oldest acceptable create
//! date. All fields default to the built-in rule set, so a policy file only
//! needs to spell out what it overrides.

use crate::DefectKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Creators permitted by default to book shipments at or above the
/// overweight threshold.
const DEFAULT_OVERWEIGHT_EXEMPTIONS: [&str; 4] = [
    "overweight_ops_1@company.com",
    "overweight_ops_2@company.com",
    "overweight_ops_3@company.com",
    "overweight_ops_4@company.com",
];

/// Defect kinds that halt the pipeline by default.
const DEFAULT_CRITICAL_KINDS: [DefectKind; 6] = [
    DefectKind::NullWeight,
    DefectKind::NullDate,
    DefectKind::FutureDate,
    DefectKind::DuplicatePrimaryReference,
    DefectKind::NullPrimaryReference,
    DefectKind::EmptyPrimaryReference,
];

/// Injectable policy for one audit run.
///
/// # Example
///
/// ```rust
/// use shipments_core::{DefectKind, PolicyConfig};
///
/// let policy = PolicyConfig::default();
/// assert!(policy.is_critical(DefectKind::NullWeight));
/// assert!(!policy.is_critical(DefectKind::Overweight));
/// assert!(policy.is_exempt("  Overweight_Ops_1@company.com "));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Defect kinds whose presence fails the pipeline
    pub critical_kinds: BTreeSet<DefectKind>,

    /// Creator identities allowed to exceed the overweight threshold,
    /// stored trimmed and lowercased
    pub overweight_exemptions: BTreeSet<String>,

    /// Weight at or above which a shipment needs an exempt creator
    pub overweight_threshold: f64,

    /// Create dates strictly before this day are flagged as too old
    pub earliest_create_date: NaiveDate,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            critical_kinds: DEFAULT_CRITICAL_KINDS.into(),
            overweight_exemptions: DEFAULT_OVERWEIGHT_EXEMPTIONS
                .iter()
                .map(|u| u.to_string())
                .collect(),
            overweight_threshold: 49_000.0,
            earliest_create_date: NaiveDate::from_ymd_opt(2020, 1, 1)
                .expect("valid calendar date"),
        }
    }
}

impl PolicyConfig {
    /// Returns true if the given defect kind must halt the pipeline.
    pub fn is_critical(&self, kind: DefectKind) -> bool {
        self.critical_kinds.contains(&kind)
    }

    /// Returns true if the creator is in the overweight exemption set.
    ///
    /// The lookup is normalized: surrounding whitespace is ignored and the
    /// comparison is case-insensitive. Exemption entries are expected in
    /// lowercase (the builder normalizes them on insert).
    pub fn is_exempt(&self, creator: &str) -> bool {
        self.overweight_exemptions
            .contains(&creator.trim().to_lowercase())
    }
}
