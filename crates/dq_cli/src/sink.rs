//! Report persistence: delimited text plus a rendered table.

use anyhow::{Context, Result};
use comfy_table::presets;
use dq_core::Report;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use crate::output;

/// File name of the delimited report artifact.
pub const CSV_FILE: &str = "dq_report.csv";

/// File name of the rendered report artifact.
pub const MARKDOWN_FILE: &str = "dq_report.md";

/// Writes both report artifacts into `out_dir`, creating it if needed.
pub fn write_report(report: &Report, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    write_csv(report, out_dir)?;
    write_markdown(report, out_dir)?;
    Ok(())
}

fn write_csv(report: &Report, out_dir: &Path) -> Result<()> {
    let path = out_dir.join(CSV_FILE);
    let file = File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    writer.write_record(["table", "check", "column", "value", "pct_failed"])?;
    for row in report {
        writer.write_record([
            row.table.clone(),
            row.check.to_string(),
            row.column.clone().unwrap_or_default(),
            row.value.as_ref().map(|v| v.to_string()).unwrap_or_default(),
            row.pct_failed.map(|p| p.to_string()).unwrap_or_default(),
        ])?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn write_markdown(report: &Report, out_dir: &Path) -> Result<()> {
    let path = out_dir.join(MARKDOWN_FILE);
    let rendered = output::metric_table(report, presets::ASCII_MARKDOWN);
    fs::write(&path, format!("{rendered}\n"))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_core::{CheckKind, MetricRow, MetricValue};
    use pretty_assertions::assert_eq;

    fn sample_report() -> Report {
        let mut report = Report::new();
        report.push(MetricRow {
            table: "fact_sales".to_string(),
            check: CheckKind::TotalRows,
            column: None,
            value: Some(MetricValue::RowCount(4)),
            pct_failed: Some(0.0),
        });
        report.push(MetricRow {
            table: "fact_sales".to_string(),
            check: CheckKind::Range,
            column: Some("amt".to_string()),
            value: Some(MetricValue::Bounds {
                min: Some(0.0),
                max: Some(100.0),
            }),
            pct_failed: Some(0.5),
        });
        report.push(MetricRow {
            table: "fact_sales".to_string(),
            check: CheckKind::NotNull,
            column: Some("gone".to_string()),
            value: Some(MetricValue::MissingColumn),
            pct_failed: None,
        });
        report
    }

    #[test]
    fn test_csv_artifact_format() {
        let dir = tempfile::tempdir().unwrap();
        write_report(&sample_report(), dir.path()).unwrap();

        let content = fs::read_to_string(dir.path().join(CSV_FILE)).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("table,check,column,value,pct_failed"));
        assert_eq!(lines.next(), Some("fact_sales,total_rows,,4,0"));
        assert_eq!(lines.next(), Some("fact_sales,range,amt,\"[0,100]\",0.5"));
        // Missing column: value sentinel present, pct_failed empty.
        assert_eq!(
            lines.next(),
            Some("fact_sales,not_null,gone,missing_column,")
        );
    }

    #[test]
    fn test_markdown_artifact_written() {
        let dir = tempfile::tempdir().unwrap();
        write_report(&sample_report(), dir.path()).unwrap();

        let content = fs::read_to_string(dir.path().join(MARKDOWN_FILE)).unwrap();
        assert!(content.contains("pct_failed"));
        assert!(content.contains("missing_column"));
    }

    #[test]
    fn test_out_dir_created_if_missing() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data_quality");
        write_report(&sample_report(), &nested).unwrap();
        assert!(nested.join(CSV_FILE).is_file());
        assert!(nested.join(MARKDOWN_FILE).is_file());
    }
}
