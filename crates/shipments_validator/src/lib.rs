//! # Shipments Validator
//!
//! Cleaning and validation engine for shipment batches. This crate provides
//! the core pipeline that normalizes a loaded batch in place and reports
//! data-quality defects:
//!
//! - A [`RowStore`] table abstraction with explicit null sentinels
//! - Seven [`PipelineStage`]s pairing per-field cleaners with validators
//! - The [`AuditPipeline`] orchestrator aggregating findings into an
//!   [`shipments_core::ErrorReport`]
//! - The [`PolicyGate`] that classifies defects as critical or advisory and
//!   fails the run when critical ones exist
//!
//! ## Example
//!
//! ```rust
//! use shipments_core::PolicyConfig;
//! use shipments_validator::{AuditPipeline, PolicyGate, RowStore, columns};
//!
//! let mut table = RowStore::with_columns([
//!     columns::PRIMARY_REFERENCE,
//!     columns::STATUS,
//!     columns::WEIGHT,
//!     columns::CREATE_BY,
//!     columns::CREATE_DATE,
//!     columns::ORIGIN_STATE,
//!     columns::DEST_STATE,
//!     columns::ORIGIN_NAME,
//!     columns::DEST_NAME,
//!     columns::ORIGIN_CITY,
//!     columns::DEST_CITY,
//!     columns::TARGET_SHIP,
//!     columns::TARGET_DELIVERY,
//! ]);
//!
//! let policy = PolicyConfig::default();
//! let run = AuditPipeline::standard().run(&mut table, &policy).unwrap();
//!
//! let gate = PolicyGate::new(policy);
//! if let Err(failure) = gate.enforce(&run.report) {
//!     eprintln!("{failure}");
//! }
//! ```

mod dates;
mod engine;
mod error;
mod gate;
mod ranges;
mod reference;
mod stage;
mod states;
mod status;
mod table;
mod text;
mod weight;

pub use dates::DateStage;
pub use engine::*;
pub use error::*;
pub use gate::*;
pub use ranges::RangeStage;
pub use reference::ReferenceStage;
pub use stage::{PipelineStage, StageContext};
pub use states::StateStage;
pub use status::StatusStage;
pub use table::*;
pub use text::TextStage;
pub use weight::WeightStage;
