//! In-memory table representation.
//!
//! This module provides the tabular structures the evaluator runs over:
//! dynamically-typed cell values, rows, and named-column tables.

use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// A cell value in a table.
///
/// Column values are dynamically typed; every variant the warehouse can
/// produce is represented explicitly, with `Null` for SQL NULL / missing
/// cells.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null/missing value
    Null,
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Calendar date value
    Date(NaiveDate),
}

impl Value {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int64",
            Value::Float(_) => "float64",
            Value::Text(_) => "text",
            Value::Bool(_) => "boolean",
            Value::Date(_) => "date",
        }
    }

    /// Numeric coercion: ints and floats convert directly, text parses.
    ///
    /// Everything else (null included) is undefined and satisfies no bound
    /// comparison, so it can never register as a range violation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Canonical string rendering used for allowed-value membership.
    ///
    /// Returns `None` for null: null-ness is the not-null check's concern.
    pub fn as_literal(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Text(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Date(d) => Some(d.to_string()),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

/// A single row of data.
pub type Row = HashMap<String, Value>;

/// A table: an ordered collection of rows with an explicit column list.
///
/// Column presence is judged against the column list, not per-row key
/// presence; a cell a row does not carry reads as null. Tables are
/// immutable inputs to the evaluator, and a zero-row table is valid.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table with the given column list.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Creates a table with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a table from rows, inferring the column list as the sorted
    /// union of all row keys.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let columns: BTreeSet<String> = rows
            .iter()
            .flat_map(|row| row.keys().cloned())
            .collect();
        Self {
            columns: columns.into_iter().collect(),
            rows,
        }
    }

    /// Appends a row.
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// The table's column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns true when the table has a column of the given name.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table has zero rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Values of one column in row order; cells a row does not carry read
    /// as null.
    pub fn column_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> {
        static NULL: Value = Value::Null;
        self.rows.iter().map(move |row| row.get(name).unwrap_or(&NULL))
    }
}
