//! The metric report produced by a data-quality run.
//!
//! Every check evaluates to exactly one [`MetricRow`]; a [`Report`] is the
//! ordered collection of those rows for one run. Reports are built fresh on
//! every run and carry no state between runs.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Kind of data-quality check a metric row reports on.
///
/// Variants are declared in wire-name order so the derived `Ord` matches the
/// ordering of the sorted delimited output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Non-null values must belong to a fixed permitted set
    AllowedValues,
    /// Values must never be null
    NotNull,
    /// Numeric values must fall within inclusive bounds
    Range,
    /// Unconditional table-size metric
    TotalRows,
}

impl CheckKind {
    /// The wire name used in report files.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::AllowedValues => "allowed_values",
            CheckKind::NotNull => "not_null",
            CheckKind::Range => "range",
            CheckKind::TotalRows => "total_rows",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Informational value attached to a metric row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricValue {
    /// Table size reported by the row-count metric
    RowCount(usize),
    /// The checked column is absent from the table
    MissingColumn,
    /// The bounds a range check was configured with
    Bounds {
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Size of the permitted set of an allowed-values check
    AllowedCount(usize),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::RowCount(n) => write!(f, "{n}"),
            MetricValue::MissingColumn => f.write_str("missing_column"),
            // An absent bound is shown literally as null, e.g. "[0,null]".
            MetricValue::Bounds { min, max } => {
                match min {
                    Some(v) => write!(f, "[{v},")?,
                    None => f.write_str("[null,")?,
                }
                match max {
                    Some(v) => write!(f, "{v}]"),
                    None => f.write_str("null]"),
                }
            }
            MetricValue::AllowedCount(n) => write!(f, "allowed={n}"),
        }
    }
}

/// One metric row of a data-quality report.
///
/// Invariant: `pct_failed` is `None` exactly when the referenced column is
/// absent from the table (a configuration error, not a data-quality
/// finding); otherwise it is a fraction in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    /// Table the check ran against
    pub table: String,

    /// Kind of check
    pub check: CheckKind,

    /// Checked column; absent for table-level metrics
    pub column: Option<String>,

    /// Informational value (row count, bounds, set size, sentinel)
    pub value: Option<MetricValue>,

    /// Fraction of rows violating the check
    pub pct_failed: Option<f64>,
}

impl MetricRow {
    /// True when the row records a configuration error (missing column).
    pub fn is_missing_column(&self) -> bool {
        self.pct_failed.is_none()
    }

    /// True when at least one data row violated the check.
    pub fn is_failed(&self) -> bool {
        self.pct_failed.is_some_and(|pct| pct > 0.0)
    }
}

/// Ordered collection of metric rows for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    rows: Vec<MetricRow>,
}

impl Report {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one metric row.
    pub fn push(&mut self, row: MetricRow) {
        self.rows.push(row);
    }

    /// Appends all rows of another report, preserving their relative order.
    pub fn extend(&mut self, other: Report) {
        self.rows.extend(other.rows);
    }

    /// The metric rows in their current order.
    pub fn rows(&self) -> &[MetricRow] {
        &self.rows
    }

    /// Number of metric rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the report holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorts by `(table, check, column)` with absent columns ordered last
    /// within their `(table, check)` group.
    pub fn sort(&mut self) {
        self.rows.sort_by(|a, b| {
            a.table
                .cmp(&b.table)
                .then_with(|| a.check.cmp(&b.check))
                .then_with(|| cmp_column(a.column.as_deref(), b.column.as_deref()))
        });
    }

    /// Number of checks with at least one violating row.
    pub fn failed_checks(&self) -> usize {
        self.rows.iter().filter(|row| row.is_failed()).count()
    }

    /// Number of missing-column sentinel rows.
    pub fn missing_columns(&self) -> usize {
        self.rows.iter().filter(|row| row.is_missing_column()).count()
    }
}

impl FromIterator<MetricRow> for Report {
    fn from_iter<T: IntoIterator<Item = MetricRow>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a MetricRow;
    type IntoIter = std::slice::Iter<'a, MetricRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

fn cmp_column(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
