//! The suite runner: every loaded table through the evaluator, one combined
//! sorted report.

use crate::{evaluate, Table};
use dq_core::{Report, RuleRegistry, RuleSet};
use std::collections::BTreeMap;
use tracing::info;

/// Runs the rule registry over a set of loaded tables.
///
/// The runner is driven by the data actually loaded: every table present in
/// `tables` is evaluated, with tables missing from the registry getting the
/// empty rule set (only their row-count metric), and registry entries
/// without a loaded table skipped silently. Per-table row order is preserved
/// during concatenation, then the combined report is sorted by
/// `(table, check, column)` with absent columns last.
pub fn run_suite(tables: &BTreeMap<String, Table>, registry: &RuleRegistry) -> Report {
    let empty = RuleSet::default();
    let mut report = Report::new();

    for (name, table) in tables {
        let rules = registry.get(name).unwrap_or(&empty);
        report.extend(evaluate(table, name, rules));
    }

    report.sort();
    info!(
        tables = tables.len(),
        metrics = report.len(),
        failed = report.failed_checks(),
        "data-quality suite complete"
    );
    report
}
