//! The check evaluator: one table plus its rule set, one metric row per check.
//!
//! Evaluation runs a fixed sequence (row count, not-null checks, range
//! checks, allowed-value checks) and is total: a column named in a rule but
//! absent from the table produces a sentinel row, a non-numeric value under a
//! range check fails no bound comparison, and a zero-row table reports a
//! failure fraction of 0.0 for every check.

use crate::{Table, Value};
use dq_core::{Bounds, CheckKind, MetricRow, MetricValue, Report, RuleSet};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Evaluates a rule set against a single table.
///
/// Emits exactly `1 + |not_null| + |numeric_ranges| + |allowed_values|`
/// metric rows, in that order, deterministically for the same inputs. Never
/// fails and never mutates its inputs.
pub fn evaluate(table: &Table, table_name: &str, rules: &RuleSet) -> Report {
    let mut report = Report::new();

    report.push(MetricRow {
        table: table_name.to_string(),
        check: CheckKind::TotalRows,
        column: None,
        value: Some(MetricValue::RowCount(table.len())),
        pct_failed: Some(0.0),
    });

    for column in &rules.not_null {
        report.push(not_null_metric(table, table_name, column));
    }

    for (column, bounds) in &rules.numeric_ranges {
        report.push(range_metric(table, table_name, column, bounds));
    }

    for (column, allowed) in &rules.allowed_values {
        report.push(allowed_values_metric(table, table_name, column, allowed));
    }

    debug!(
        table = table_name,
        rows = table.len(),
        checks = report.len(),
        "table evaluated"
    );
    report
}

/// Sentinel row for a column named in a rule but absent from the table.
///
/// A configuration error, not a data-quality finding: `pct_failed` is left
/// undefined and the run continues.
fn missing_column(table_name: &str, check: CheckKind, column: &str) -> MetricRow {
    warn!(
        table = table_name,
        column, "column named in a rule is absent from the table"
    );
    MetricRow {
        table: table_name.to_string(),
        check,
        column: Some(column.to_string()),
        value: Some(MetricValue::MissingColumn),
        pct_failed: None,
    }
}

/// Failure fraction, defined as 0.0 for a zero-row table.
fn fraction(failed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        failed as f64 / total as f64
    }
}

fn not_null_metric(table: &Table, table_name: &str, column: &str) -> MetricRow {
    if !table.has_column(column) {
        return missing_column(table_name, CheckKind::NotNull, column);
    }

    let nulls = table.column_values(column).filter(|v| v.is_null()).count();
    MetricRow {
        table: table_name.to_string(),
        check: CheckKind::NotNull,
        column: Some(column.to_string()),
        value: None,
        pct_failed: Some(fraction(nulls, table.len())),
    }
}

fn range_metric(table: &Table, table_name: &str, column: &str, bounds: &Bounds) -> MetricRow {
    if !table.has_column(column) {
        return missing_column(table_name, CheckKind::Range, column);
    }

    // Values that fail numeric coercion are undefined under the bounds and
    // never count as range violations; out-of-range and not-numeric stay
    // distinct failure modes.
    let failed = table
        .column_values(column)
        .filter_map(Value::as_f64)
        .filter(|v| bounds.violated_by(*v))
        .count();

    MetricRow {
        table: table_name.to_string(),
        check: CheckKind::Range,
        column: Some(column.to_string()),
        value: Some(MetricValue::Bounds {
            min: bounds.min,
            max: bounds.max,
        }),
        pct_failed: Some(fraction(failed, table.len())),
    }
}

fn allowed_values_metric(
    table: &Table,
    table_name: &str,
    column: &str,
    allowed: &BTreeSet<String>,
) -> MetricRow {
    if !table.has_column(column) {
        return missing_column(table_name, CheckKind::AllowedValues, column);
    }

    // Nulls are exempt here; they are the not-null check's concern.
    let failed = table
        .column_values(column)
        .filter_map(Value::as_literal)
        .filter(|literal| !allowed.contains(literal))
        .count();

    MetricRow {
        table: table_name.to_string(),
        check: CheckKind::AllowedValues,
        column: Some(column.to_string()),
        value: Some(MetricValue::AllowedCount(allowed.len())),
        pct_failed: Some(fraction(failed, table.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Row;
    use dq_core::RuleSetBuilder;
    use pretty_assertions::assert_eq;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_total_rows_always_first() {
        let table = Table::from_rows(vec![
            row(&[("id", Value::Int(1))]),
            row(&[("id", Value::Int(2))]),
        ]);
        let report = evaluate(&table, "t", &RuleSetBuilder::new().build());

        assert_eq!(report.len(), 1);
        let first = &report.rows()[0];
        assert_eq!(first.check, CheckKind::TotalRows);
        assert_eq!(first.column, None);
        assert_eq!(first.value, Some(MetricValue::RowCount(2)));
        assert_eq!(first.pct_failed, Some(0.0));
    }

    #[test]
    fn test_not_null_fraction() {
        let table = Table::from_rows(vec![
            row(&[("amt", Value::Int(1))]),
            row(&[("amt", Value::Null)]),
            row(&[("amt", Value::Int(3))]),
            row(&[("amt", Value::Null)]),
        ]);
        let rules = RuleSetBuilder::new().not_null("amt").build();
        let report = evaluate(&table, "t", &rules);

        let not_null = &report.rows()[1];
        assert_eq!(not_null.check, CheckKind::NotNull);
        assert_eq!(not_null.value, None);
        assert_eq!(not_null.pct_failed, Some(0.5));
    }

    #[test]
    fn test_missing_column_sentinel_for_every_kind() {
        let table = Table::from_rows(vec![row(&[("id", Value::Int(1))])]);
        let rules = RuleSetBuilder::new()
            .not_null("gone_a")
            .range("gone_b", Bounds::at_least(0.0))
            .allowed("gone_c", ["x"])
            .build();

        let report = evaluate(&table, "t", &rules);
        assert_eq!(report.len(), 4);

        for metric in report.rows().iter().skip(1) {
            assert_eq!(metric.value, Some(MetricValue::MissingColumn));
            assert_eq!(metric.pct_failed, None);
            assert!(metric.is_missing_column());
        }
    }

    #[test]
    fn test_empty_table_is_vacuously_clean() {
        let table = Table::new(vec!["amt".to_string(), "status".to_string()]);
        let rules = RuleSetBuilder::new()
            .not_null("amt")
            .range("amt", Bounds::between(0.0, 100.0))
            .allowed("status", ["on"])
            .build();

        let report = evaluate(&table, "t", &rules);
        assert_eq!(report.len(), 4);
        for metric in report.rows() {
            assert_eq!(metric.pct_failed, Some(0.0));
        }
    }

    #[test]
    fn test_range_bound_independence() {
        let values = [-5.0, 0.0, 50.0, 100.0, 150.0];
        let table = Table::from_rows(
            values
                .iter()
                .map(|v| row(&[("amt", Value::Float(*v))]))
                .collect(),
        );

        // Only a minimum: exactly the values below it fail.
        let min_only = RuleSetBuilder::new()
            .range("amt", Bounds::at_least(0.0))
            .build();
        let report = evaluate(&table, "t", &min_only);
        assert_eq!(report.rows()[1].pct_failed, Some(0.2));

        // Only a maximum: exactly the values above it fail.
        let max_only = RuleSetBuilder::new()
            .range("amt", Bounds::at_most(100.0))
            .build();
        let report = evaluate(&table, "t", &max_only);
        assert_eq!(report.rows()[1].pct_failed, Some(0.2));

        // Both: the union of the two.
        let both = RuleSetBuilder::new()
            .range("amt", Bounds::between(0.0, 100.0))
            .build();
        let report = evaluate(&table, "t", &both);
        assert_eq!(report.rows()[1].pct_failed, Some(0.4));
    }

    #[test]
    fn test_range_exempts_non_numeric_values() {
        let table = Table::from_rows(vec![
            row(&[("amt", Value::Int(10))]),
            row(&[("amt", Value::Null)]),
            row(&[("amt", Value::Text("n/a".into()))]),
            row(&[("amt", Value::Int(-1))]),
        ]);
        let rules = RuleSetBuilder::new()
            .range("amt", Bounds::at_least(0.0))
            .build();

        let report = evaluate(&table, "t", &rules);
        // Only the -1 row violates; null and "n/a" coerce to undefined.
        assert_eq!(report.rows()[1].pct_failed, Some(0.25));
    }

    #[test]
    fn test_range_coerces_numeric_text() {
        let table = Table::from_rows(vec![
            row(&[("amt", Value::Text("-3".into()))]),
            row(&[("amt", Value::Text("7".into()))]),
        ]);
        let rules = RuleSetBuilder::new()
            .range("amt", Bounds::at_least(0.0))
            .build();

        let report = evaluate(&table, "t", &rules);
        assert_eq!(report.rows()[1].pct_failed, Some(0.5));
    }

    #[test]
    fn test_allowed_values_exempts_null() {
        let table = Table::from_rows(vec![
            row(&[("status", Value::Text("Active".into()))]),
            row(&[("status", Value::Null)]),
            row(&[("status", Value::Text("Bogus".into()))]),
            row(&[("status", Value::Text("Expired".into()))]),
        ]);
        let rules = RuleSetBuilder::new()
            .allowed("status", ["Active", "Expired"])
            .build();

        let report = evaluate(&table, "t", &rules);
        let metric = &report.rows()[1];
        assert_eq!(metric.value, Some(MetricValue::AllowedCount(2)));
        // Only "Bogus" fails; the null row is exempt.
        assert_eq!(metric.pct_failed, Some(0.25));
    }

    #[test]
    fn test_allowed_values_matches_numeric_literals() {
        let table = Table::from_rows(vec![
            row(&[("tier", Value::Int(1))]),
            row(&[("tier", Value::Int(4))]),
        ]);
        let rules = RuleSetBuilder::new().allowed("tier", ["1", "2", "3"]).build();

        let report = evaluate(&table, "t", &rules);
        assert_eq!(report.rows()[1].pct_failed, Some(0.5));
    }

    #[test]
    fn test_row_count_invariant() {
        let table = Table::from_rows(vec![row(&[("a", Value::Int(1))])]);
        let rules = RuleSetBuilder::new()
            .not_null_columns(["a", "b"])
            .range("a", Bounds::at_least(0.0))
            .allowed("a", ["1"])
            .allowed("c", ["x"])
            .build();

        let report = evaluate(&table, "t", &rules);
        assert_eq!(report.len(), rules.check_count());
        assert_eq!(report.len(), 1 + 2 + 1 + 2);
    }
}
