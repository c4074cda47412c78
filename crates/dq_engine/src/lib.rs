//! # Data-Quality Engine
//!
//! The check engine for the gold-schema data-quality suite. This crate
//! provides the in-memory table representation, the check evaluator that
//! turns one table plus its rule set into metric rows, and the suite runner
//! that covers every loaded table.
//!
//! The central contract: the evaluator never fails. A missing column, a
//! non-numeric value under a range check, and a zero-row table all degrade
//! to defined metric values instead of errors.
//!
//! ## Example
//!
//! ```rust
//! use dq_core::{Bounds, RuleSetBuilder};
//! use dq_engine::{evaluate, Table, Value};
//!
//! let table = Table::from_rows(vec![
//!     [("amt".to_string(), Value::Int(10))].into_iter().collect(),
//!     [("amt".to_string(), Value::Null)].into_iter().collect(),
//! ]);
//! let rules = RuleSetBuilder::new()
//!     .not_null("amt")
//!     .range("amt", Bounds::at_least(0.0))
//!     .build();
//!
//! let report = evaluate(&table, "fact_sales", &rules);
//! assert_eq!(report.len(), 3);
//! ```

mod evaluator;
mod source;
mod suite;
mod table;

pub use evaluator::*;
pub use source::*;
pub use suite::*;
pub use table::*;
