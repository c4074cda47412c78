//! Data-quality rule types and the per-table rule registry.
//!
//! A rule set is static configuration: constructed once (from a rules file or
//! via the builders) and never mutated while the suite runs.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Inclusive numeric bounds for a range check.
///
/// Either side may be absent, leaving that side unbounded. A value violates
/// the bounds when it falls below a configured minimum or above a configured
/// maximum; with both bounds set the two conditions combine with logical OR.
///
/// # Example
///
/// ```rust
/// use dq_core::Bounds;
///
/// let bounds = Bounds::between(0.0, 100.0);
/// assert!(bounds.violated_by(-5.0));
/// assert!(bounds.violated_by(999.0));
/// assert!(!bounds.violated_by(100.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bounds {
    /// Minimum value (inclusive); unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Maximum value (inclusive); unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Bounds {
    /// Bounds with only a minimum.
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Bounds with only a maximum.
    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Bounds with both sides set.
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Returns true when `value` falls outside the configured bounds.
    pub fn violated_by(&self, value: f64) -> bool {
        self.min.is_some_and(|min| value < min) || self.max.is_some_and(|max| value > max)
    }
}

/// Declarative data-quality checks for a single table.
///
/// All three categories are optional; an empty rule set still produces the
/// unconditional row-count metric when evaluated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RuleSet {
    /// Columns that must never hold null
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub not_null: Vec<String>,

    /// Numeric columns restricted to inclusive bounds
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub numeric_ranges: BTreeMap<String, Bounds>,

    /// Columns whose non-null values must belong to a fixed literal set
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub allowed_values: BTreeMap<String, BTreeSet<String>>,
}

impl RuleSet {
    /// Returns true when no check of any category is configured.
    pub fn is_empty(&self) -> bool {
        self.not_null.is_empty() && self.numeric_ranges.is_empty() && self.allowed_values.is_empty()
    }

    /// Number of metric rows one evaluation of this rule set emits,
    /// including the unconditional row-count metric.
    pub fn check_count(&self) -> usize {
        1 + self.not_null.len() + self.numeric_ranges.len() + self.allowed_values.len()
    }
}

/// Static mapping from table name to its rule set.
///
/// Tables are kept in name order so iteration (and therefore evaluation and
/// serialization) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleRegistry {
    tables: BTreeMap<String, RuleSet>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the rule set for a table.
    pub fn insert(&mut self, table: impl Into<String>, rules: RuleSet) {
        self.tables.insert(table.into(), rules);
    }

    /// Looks up the rule set configured for a table.
    pub fn get(&self, table: &str) -> Option<&RuleSet> {
        self.tables.get(table)
    }

    /// Names of all configured tables, in name order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Iterates over `(table name, rule set)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSet)> {
        self.tables.iter().map(|(name, rules)| (name.as_str(), rules))
    }

    /// Number of configured tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true when no table is configured.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<(String, RuleSet)> for RuleRegistry {
    fn from_iter<T: IntoIterator<Item = (String, RuleSet)>>(iter: T) -> Self {
        Self {
            tables: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bounds_violation() {
        let min_only = Bounds::at_least(1.0);
        assert!(min_only.violated_by(0.5));
        assert!(!min_only.violated_by(1.0));
        assert!(!min_only.violated_by(1_000_000.0));

        let max_only = Bounds::at_most(1.0);
        assert!(max_only.violated_by(1.5));
        assert!(!max_only.violated_by(1.0));
        assert!(!max_only.violated_by(-1_000_000.0));

        let both = Bounds::between(0.0, 1.0);
        assert!(both.violated_by(-0.1));
        assert!(both.violated_by(1.1));
        assert!(!both.violated_by(0.0));
        assert!(!both.violated_by(1.0));
    }

    #[test]
    fn test_unbounded_never_violated() {
        let open = Bounds::default();
        assert!(!open.violated_by(f64::MIN));
        assert!(!open.violated_by(f64::MAX));
    }

    #[test]
    fn test_rule_set_check_count() {
        let empty = RuleSet::default();
        assert!(empty.is_empty());
        assert_eq!(empty.check_count(), 1);

        let rules = RuleSet {
            not_null: vec!["a".to_string(), "b".to_string()],
            numeric_ranges: BTreeMap::from([("c".to_string(), Bounds::at_least(0.0))]),
            allowed_values: BTreeMap::from([(
                "d".to_string(),
                BTreeSet::from(["x".to_string()]),
            )]),
        };
        assert!(!rules.is_empty());
        assert_eq!(rules.check_count(), 5);
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = RuleRegistry::new();
        assert!(registry.is_empty());

        registry.insert("fact_sales", RuleSet::default());
        assert_eq!(registry.len(), 1);
        assert!(registry.get("fact_sales").is_some());
        assert!(registry.get("dim_customer").is_none());
    }

    #[test]
    fn test_registry_iterates_in_name_order() {
        let mut registry = RuleRegistry::new();
        registry.insert("zulu", RuleSet::default());
        registry.insert("alpha", RuleSet::default());
        registry.insert("mike", RuleSet::default());

        let names: Vec<&str> = registry.table_names().collect();
        assert_eq!(names, vec!["alpha", "mike", "zulu"]);
    }
}
