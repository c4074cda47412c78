//! # Data-Quality Core
//!
//! Core data structures for the gold-schema data-quality suite.
//!
//! This crate provides the building blocks shared by the check engine, the
//! rules parser and the CLI: the declarative rule model, the registry mapping
//! warehouse tables to their rules, and the metric report produced by a run.
//!
//! ## Key Concepts
//!
//! - **RuleSet**: the declarative checks configured for one table (not-null
//!   columns, inclusive numeric ranges, allowed-value sets)
//! - **RuleRegistry**: the static mapping from table name to its rule set
//! - **MetricRow / Report**: one metric row per check, collected into an
//!   ordered report
//!
//! ## Example
//!
//! ```rust
//! use dq_core::{Bounds, RuleRegistry, RuleSetBuilder};
//!
//! let mut registry = RuleRegistry::new();
//! registry.insert(
//!     "fact_sales",
//!     RuleSetBuilder::new()
//!         .not_null("sales_order_id")
//!         .not_null("order_date")
//!         .range("unit_price", Bounds::at_least(0.0))
//!         .build(),
//! );
//!
//! assert_eq!(registry.get("fact_sales").unwrap().check_count(), 4);
//! ```

pub mod builder;
pub mod error;
pub mod report;
pub mod rules;

pub use builder::*;
pub use error::*;
pub use report::*;
pub use rules::*;
