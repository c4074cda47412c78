//! Parser for data-quality rules files (YAML/TOML formats).
//!
//! This module provides functionality to parse a rules registry from YAML and
//! TOML files into the strongly-typed `RuleRegistry` structure.
//!
//! # Example
//!
//! ```rust
//! use dq_parser::parse_yaml;
//!
//! let yaml = r#"
//! fact_sales:
//!   not_null: [sales_order_id, order_date]
//!   numeric_ranges:
//!     unit_price: { min: 0 }
//! "#;
//!
//! let registry = parse_yaml(yaml).expect("Failed to parse rules");
//! assert!(registry.get("fact_sales").is_some());
//! ```

use dq_core::RuleRegistry;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during rules parsing.
#[derive(Debug, Error)]
pub enum ParserError {
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
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported rules file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a rules registry from a YAML string.
pub fn parse_yaml(content: &str) -> Result<RuleRegistry> {
    let registry: RuleRegistry = serde_yaml_ng::from_str(content)?;
    Ok(registry)
}

/// Parse a rules registry from a TOML string.
///
/// # Example
///
/// ```rust
/// use dq_parser::parse_toml;
///
/// let toml = r#"
/// [dim_product]
/// not_null = ["ProductID", "Name"]
///
/// [dim_product.numeric_ranges]
/// ListPrice = { min = 0 }
/// "#;
///
/// let registry = parse_toml(toml).unwrap();
/// assert_eq!(registry.len(), 1);
/// ```
pub fn parse_toml(content: &str) -> Result<RuleRegistry> {
    let registry: RuleRegistry =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(registry)
}

/// Detect the rules file format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `RulesFormat::Yaml`
/// * `.toml` → `RulesFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<RulesFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(RulesFormat::Yaml),
        "toml" => Ok(RulesFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a rules registry from a file with automatic format detection.
///
/// The format is determined by the file extension:
/// - `.yaml`, `.yml` → parsed as YAML
/// - `.toml` → parsed as TOML
///
/// # Example
///
/// ```no_run
/// use dq_parser::parse_file;
/// use std::path::Path;
///
/// let registry = parse_file(Path::new("rules/gold.yml")).unwrap();
/// println!("Configured tables: {}", registry.len());
/// ```
pub fn parse_file(path: &Path) -> Result<RuleRegistry> {
    let content = std::fs::read_to_string(path)?;
    let format = detect_format(path)?;

    match format {
        RulesFormat::Yaml => parse_yaml(&content),
        RulesFormat::Toml => parse_toml(&content),
    }
}
