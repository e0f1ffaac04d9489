//! Error types for pipeline operations.

use thiserror::Error;

/// Errors that can abort an audit run.
///
/// Data-quality findings are never errors; they are collected into the
/// report. This enum covers the structural tier: preconditions under which
/// no further validation is meaningful, plus the gate's terminal failure.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input does not carry a column a stage depends on
    #[error("required column '{0}' is missing from the input")]
    MissingColumn(String),

    /// The policy gate found critical defects
    #[error("pipeline failed due to critical defects: {0}")]
    CriticalDefects(String),
}

impl PipelineError {
    /// Creates a new missing column error.
    pub fn missing_column(name: impl Into<String>) -> Self {
        Self::MissingColumn(name.into())
    }
}
