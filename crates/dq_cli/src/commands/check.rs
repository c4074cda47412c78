use anyhow::{Context, Result};
use dq_parser::parse_file;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(rules_path: &str) -> Result<()> {
    info!("Checking rules registry: {}", rules_path);

    let registry = parse_file(Path::new(rules_path))
        .with_context(|| format!("Failed to parse rules file: {rules_path}"))?;

    registry
        .validate()
        .context("Rules registry failed validation")?;

    output::print_success("Rules registry is valid");

    println!("\nRegistry Summary:");
    println!("  Tables: {}", registry.len());

    for (name, rules) in registry.iter() {
        let mut categories = Vec::new();
        if !rules.not_null.is_empty() {
            categories.push(format!("{} not_null", rules.not_null.len()));
        }
        if !rules.numeric_ranges.is_empty() {
            categories.push(format!("{} range", rules.numeric_ranges.len()));
        }
        if !rules.allowed_values.is_empty() {
            categories.push(format!("{} allowed_values", rules.allowed_values.len()));
        }
        if categories.is_empty() {
            categories.push("row count only".to_string());
        }
        println!("  {:<20} {}", name, categories.join(", "));
    }

    Ok(())
}
