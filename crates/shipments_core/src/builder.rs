//! Builder pattern for policy configuration.
//!
//! Provides an ergonomic fluent API for assembling a [`PolicyConfig`] in
//! code, starting from the built-in defaults.

use crate::{DefectKind, PolicyConfig};
use chrono::NaiveDate;

/// Builder for creating a [`PolicyConfig`].
///
/// # Example
///
/// ```rust
/// use shipments_core::{DefectKind, PolicyBuilder};
///
/// let policy = PolicyBuilder::new()
///     .overweight_threshold(45_000.0)
///     .exempt_user("Heavy_Haul@Company.com")
///     .critical_kind(DefectKind::InvalidStatus)
///     .build();
///
/// assert!(policy.is_exempt("heavy_haul@company.com"));
/// assert!(policy.is_critical(DefectKind::InvalidStatus));
/// ```
#[derive(Debug, Default)]
pub struct PolicyBuilder {
    config: PolicyConfig,
}

impl PolicyBuilder {
    /// Creates a builder seeded with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the critical defect set.
    pub fn critical_kinds(mut self, kinds: impl IntoIterator<Item = DefectKind>) -> Self {
        self.config.critical_kinds = kinds.into_iter().collect();
        self
    }

    /// Adds one defect kind to the critical set.
    pub fn critical_kind(mut self, kind: DefectKind) -> Self {
        self.config.critical_kinds.insert(kind);
        self
    }

    /// Replaces the overweight exemption set. Entries are normalized
    /// (trimmed, lowercased) on insert.
    pub fn exemptions<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.overweight_exemptions = users
            .into_iter()
            .map(|u| u.into().trim().to_lowercase())
            .collect();
        self
    }

    /// Adds one creator to the overweight exemption set, normalized.
    pub fn exempt_user(mut self, user: impl Into<String>) -> Self {
        self.config
            .overweight_exemptions
            .insert(user.into().trim().to_lowercase());
        self
    }

    /// Sets the overweight threshold.
    pub fn overweight_threshold(mut self, threshold: f64) -> Self {
        self.config.overweight_threshold = threshold;
        self
    }

    /// Sets the oldest acceptable create date.
    pub fn earliest_create_date(mut self, date: NaiveDate) -> Self {
        self.config.earliest_create_date = date;
        self
    }

    /// Builds the policy.
    pub fn build(self) -> PolicyConfig {
        self.config
    }
}
