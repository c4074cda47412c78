//! Builder pattern for constructing rule sets and registries.
//!
//! This module provides ergonomic builders for assembling rule configuration
//! in code, plus the default registry for the gold sales schema.

use crate::{Bounds, RuleRegistry, RuleSet};
use std::collections::{BTreeMap, BTreeSet};

/// Builder for creating a [`RuleSet`].
///
/// # Example
///
/// ```rust
/// use dq_core::{Bounds, RuleSetBuilder};
///
/// let rules = RuleSetBuilder::new()
///     .not_null("customer_id")
///     .range("list_price", Bounds::at_least(0.0))
///     .allowed("offer_status", ["Active", "Expired"])
///     .build();
///
/// assert_eq!(rules.check_count(), 4);
/// ```
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    not_null: Vec<String>,
    numeric_ranges: BTreeMap<String, Bounds>,
    allowed_values: BTreeMap<String, BTreeSet<String>>,
}

impl RuleSetBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column that must never hold null.
    pub fn not_null(mut self, column: impl Into<String>) -> Self {
        self.not_null.push(column.into());
        self
    }

    /// Adds several not-null columns at once.
    pub fn not_null_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.not_null.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Adds an inclusive numeric-range check for a column.
    pub fn range(mut self, column: impl Into<String>, bounds: Bounds) -> Self {
        self.numeric_ranges.insert(column.into(), bounds);
        self
    }

    /// Adds an allowed-values check for a column.
    pub fn allowed<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values
            .insert(column.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the rule set.
    pub fn build(self) -> RuleSet {
        RuleSet {
            not_null: self.not_null,
            numeric_ranges: self.numeric_ranges,
            allowed_values: self.allowed_values,
        }
    }
}

/// The default rule registry for the gold sales schema.
///
/// Covers the fact table and the dimensions the warehouse ships with; used
/// by the CLI to seed a starter rules file.
pub fn gold_defaults() -> RuleRegistry {
    let mut registry = RuleRegistry::new();

    registry.insert(
        "fact_sales",
        RuleSetBuilder::new()
            .not_null_columns(["sales_order_id", "order_date", "customer_id", "product_id"])
            .range("unit_price", Bounds::at_least(0.0))
            .range("gross_revenue", Bounds::at_least(0.0))
            .range("net_revenue", Bounds::at_least(0.0))
            .range("order_qty", Bounds::at_least(0.0))
            .build(),
    );

    registry.insert(
        "dim_special_offer",
        RuleSetBuilder::new()
            .not_null_columns([
                "special_offer_id",
                "category",
                "start_date",
                "end_date",
                "offer_status",
            ])
            .range("min_qty", Bounds::at_least(1.0))
            .range("max_qty", Bounds::at_least(0.0))
            .range("duration_days", Bounds::between(0.0, 1.0))
            .build(),
    );

    registry.insert(
        "dim_product",
        RuleSetBuilder::new()
            .not_null_columns(["ProductID", "Name"])
            .range("ListPrice", Bounds::at_least(0.0))
            .range("StandardCost", Bounds::at_least(0.0))
            .build(),
    );

    registry.insert(
        "dim_customer",
        RuleSetBuilder::new().not_null("CustomerID").build(),
    );

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_collects_all_categories() {
        let rules = RuleSetBuilder::new()
            .not_null("id")
            .not_null_columns(["a", "b"])
            .range("price", Bounds::between(0.0, 10.0))
            .allowed("status", ["on", "off"])
            .build();

        assert_eq!(rules.not_null, vec!["id", "a", "b"]);
        assert_eq!(
            rules.numeric_ranges.get("price"),
            Some(&Bounds::between(0.0, 10.0))
        );
        assert_eq!(rules.allowed_values.get("status").unwrap().len(), 2);
        assert_eq!(rules.check_count(), 6);
    }

    #[test]
    fn test_gold_defaults_cover_all_tables() {
        let registry = gold_defaults();
        let names: Vec<&str> = registry.table_names().collect();
        assert_eq!(
            names,
            vec!["dim_customer", "dim_product", "dim_special_offer", "fact_sales"]
        );

        let fact = registry.get("fact_sales").unwrap();
        assert_eq!(fact.not_null.len(), 4);
        assert_eq!(fact.numeric_ranges.len(), 4);
        assert_eq!(fact.check_count(), 9);

        let offer = registry.get("dim_special_offer").unwrap();
        assert_eq!(
            offer.numeric_ranges.get("duration_days"),
            Some(&Bounds::between(0.0, 1.0))
        );
    }
}
