//! Parser for audit policy files (YAML/TOML formats).
//!
//! Policies tune the audit per deployment: which defect kinds are critical,
//! which creators may book overweight shipments, the overweight threshold
//! and the create-date cutoff. Every field is optional; anything a file
//! leaves out keeps its built-in default.
//!
//! # Example
//!
//! ```rust
//! use shipments_policy::parse_yaml;
//! use shipments_core::DefectKind;
//!
//! let yaml = r#"
//! overweight_threshold: 45000.0
//! overweight_exemptions:
//!   - heavy_haul@company.com
//! "#;
//!
//! let policy = parse_yaml(yaml).expect("Failed to parse policy");
//! assert_eq!(policy.overweight_threshold, 45_000.0);
//! assert!(policy.is_exempt("heavy_haul@company.com"));
//! assert!(policy.is_critical(DefectKind::NullWeight));
//! ```

use shipments_core::PolicyConfig;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during policy parsing.
#[derive(Debug, Error)]
pub enum PolicyFileError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported policy format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for policy parsing operations.
pub type Result<T> = std::result::Result<T, PolicyFileError>;

/// Supported policy file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a policy from a YAML string.
pub fn parse_yaml(content: &str) -> Result<PolicyConfig> {
    let policy: PolicyConfig = serde_yaml_ng::from_str(content)?;
    Ok(policy)
}

/// Parse a policy from a TOML string.
///
/// # Example
///
/// ```rust
/// use shipments_policy::parse_toml;
/// use shipments_core::DefectKind;
///
/// let toml = r#"
/// critical_kinds = ["null_weight", "overweight"]
/// "#;
///
/// let policy = parse_toml(toml).unwrap();
/// assert!(policy.is_critical(DefectKind::Overweight));
/// assert!(!policy.is_critical(DefectKind::FutureDate));
/// ```
pub fn parse_toml(content: &str) -> Result<PolicyConfig> {
    let policy: PolicyConfig =
        toml::from_str(content).map_err(|e| PolicyFileError::TomlError(e.to_string()))?;
    Ok(policy)
}

/// Detect the policy format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `PolicyFormat::Yaml`
/// * `.toml` → `PolicyFormat::Toml`
///
/// # Errors
///
/// Returns `PolicyFileError::InvalidExtension` if the file has no extension.
/// Returns `PolicyFileError::UnsupportedFormat` if the extension is not
/// recognized.
pub fn detect_format(path: &Path) -> Result<PolicyFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(PolicyFileError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(PolicyFormat::Yaml),
        "toml" => Ok(PolicyFormat::Toml),
        other => Err(PolicyFileError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a policy from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use shipments_policy::parse_file;
/// use std::path::Path;
///
/// let policy = parse_file(Path::new("policies/production.yml")).unwrap();
/// println!("Critical kinds: {}", policy.critical_kinds.len());
/// ```
pub fn parse_file(path: &Path) -> Result<PolicyConfig> {
    let content = std::fs::read_to_string(path)?;
    let format = detect_format(path)?;

    match format {
        PolicyFormat::Yaml => parse_yaml(&content),
        PolicyFormat::Toml => parse_toml(&content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shipments_core::DefectKind;

    #[test]
    fn test_parse_empty_yaml_yields_defaults() {
        let policy = parse_yaml("{}").expect("Failed to parse empty policy");
        assert_eq!(policy, PolicyConfig::default());
    }

    #[test]
    fn test_parse_yaml_overrides() {
        let yaml = r#"
critical_kinds:
  - null_weight
  - invalid_status
overweight_exemptions:
  - heavy_haul@company.com
overweight_threshold: 45000.0
earliest_create_date: 2021-06-01
"#;

        let policy = parse_yaml(yaml).expect("Failed to parse policy YAML");

        assert!(policy.is_critical(DefectKind::NullWeight));
        assert!(policy.is_critical(DefectKind::InvalidStatus));
        assert!(!policy.is_critical(DefectKind::NullDate));
        assert!(policy.is_exempt("heavy_haul@company.com"));
        assert_eq!(policy.overweight_threshold, 45_000.0);
        assert_eq!(
            policy.earliest_create_date,
            chrono::NaiveDate::from_ymd_opt(2021, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_toml_overrides() {
        let toml = r#"
overweight_threshold = 50000.0
overweight_exemptions = ["ops_lead@company.com"]
"#;

        let policy = parse_toml(toml).expect("Failed to parse policy TOML");

        assert_eq!(policy.overweight_threshold, 50_000.0);
        assert!(policy.is_exempt("ops_lead@company.com"));
        // Untouched fields keep their defaults
        assert_eq!(
            policy.critical_kinds,
            PolicyConfig::default().critical_kinds
        );
    }

    #[test]
    fn test_unknown_defect_kind_is_an_error() {
        let yaml = r#"
critical_kinds:
  - not_a_kind
"#;
        assert!(matches!(
            parse_yaml(yaml),
            Err(PolicyFileError::YamlError(_))
        ));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(Path::new("policy.yml")).unwrap(),
            PolicyFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("policy.YAML")).unwrap(),
            PolicyFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("policy.toml")).unwrap(),
            PolicyFormat::Toml
        );
        assert!(matches!(
            detect_format(Path::new("policy.json")),
            Err(PolicyFileError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            detect_format(Path::new("policy")),
            Err(PolicyFileError::InvalidExtension)
        ));
    }

    #[test]
    fn test_parse_missing_file_is_io_error() {
        let result = parse_file(Path::new("/nonexistent/policy.yml"));
        assert!(matches!(result, Err(PolicyFileError::IoError(_))));
    }
}
