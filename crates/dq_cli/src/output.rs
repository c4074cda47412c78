use colored::*;
use comfy_table::{presets, Table as TextTable};
use dq_core::Report;

/// Renders a report as a text table with the given comfy-table preset.
///
/// Column order and naming are the report's only format contract:
/// `table,check,column,value,pct_failed`.
pub fn metric_table(report: &Report, preset: &str) -> TextTable {
    let mut table = TextTable::new();
    table.load_preset(preset);
    table.set_header(vec!["table", "check", "column", "value", "pct_failed"]);

    for row in report {
        table.add_row(vec![
            row.table.clone(),
            row.check.to_string(),
            row.column.clone().unwrap_or_default(),
            row.value.as_ref().map(|v| v.to_string()).unwrap_or_default(),
            row.pct_failed.map(|p| p.to_string()).unwrap_or_default(),
        ]);
    }

    table
}

/// Prints the report to the terminal in the requested format.
pub fn print_report(report: &Report, format: &str) {
    match format {
        "json" => match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{json}"),
            Err(e) => print_error(&format!("failed to serialize report: {e}")),
        },
        _ => println!("{}", metric_table(report, presets::UTF8_FULL)),
    }
}

/// Prints the run summary with pass/fail coloring.
pub fn print_summary(report: &Report, tables_checked: usize) {
    let failed = report.failed_checks();
    let missing = report.missing_columns();

    println!("\n{}", "═".repeat(60));
    println!("{}", "  DATA QUALITY REPORT".bold());
    println!("{}", "═".repeat(60));

    if failed == 0 && missing == 0 {
        println!("\n{} {}", "✓".green().bold(), "All checks passed".green().bold());
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            format!("{failed} check(s) failed").red().bold()
        );
    }

    if missing > 0 {
        println!(
            "{} {}",
            "!".yellow().bold(),
            format!("{missing} rule(s) reference missing columns").yellow()
        );
    }

    println!("\n{}", "Summary:".bold());
    println!("  Tables checked: {tables_checked}");
    println!("  Metric rows:    {}", report.len());
    println!("  Failed checks:  {failed}");
    println!("{}", "═".repeat(60));
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow().bold(), message.yellow());
}
