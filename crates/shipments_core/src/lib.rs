//! # Shipments Core
//!
//! Core data structures and types for the shipment batch audit engine.
//!
//! This crate provides the building blocks shared by the pipeline, the policy
//! file parser and the CLI:
//!
//! - **Domain / DefectKind / Defect**: the vocabulary of data-quality
//!   findings, keyed by the field group they belong to
//! - **ErrorReport**: the two-level defect report produced by one audit pass
//! - **PolicyConfig**: the injectable policy knobs (critical defect set,
//!   overweight exemptions, thresholds) consumed by the validators and the
//!   policy gate
//!
//! ## Example
//!
//! ```rust
//! use shipments_core::{Defect, DefectKind, Domain, ErrorReport, PolicyBuilder};
//!
//! let mut report = ErrorReport::new();
//! report.insert(
//!     Domain::Weight,
//!     [(DefectKind::NullWeight, Defect::at_rows(&[0, 3]))].into(),
//! );
//!
//! let policy = PolicyBuilder::new().overweight_threshold(45_000.0).build();
//! assert!(policy.is_critical(DefectKind::NullWeight));
//! assert_eq!(report.get(Domain::Weight, DefectKind::NullWeight).unwrap().count, 2);
//! ```

pub mod builder;
pub mod policy;
pub mod report;

pub use builder::*;
pub use policy::*;
pub use report::*;
