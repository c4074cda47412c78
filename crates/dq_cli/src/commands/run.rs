use anyhow::{anyhow, Context, Result};
use dq_engine::{run_suite, SourceError, Table, TableSource};
use dq_parser::parse_file;
use dq_warehouse::{CsvSource, PostgresSource, WarehouseConfig};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::{output, sink};

pub async fn execute(
    rules_path: &str,
    warehouse_url: Option<&str>,
    schema: &str,
    csv_dir: Option<&str>,
    tables: &[String],
    out_dir: &str,
    format: &str,
) -> Result<()> {
    info!("Running data-quality suite with rules: {}", rules_path);

    let registry = parse_file(Path::new(rules_path))
        .with_context(|| format!("Failed to parse rules file: {rules_path}"))?;
    registry
        .validate()
        .context("Rules registry failed validation")?;

    output::print_info(&format!(
        "Rules registry loaded: {} table(s) configured",
        registry.len()
    ));

    // Default to every table the registry names; the run is still driven by
    // what actually loads.
    let requested: Vec<String> = if tables.is_empty() {
        registry.table_names().map(str::to_string).collect()
    } else {
        tables.to_vec()
    };

    let source = build_source(warehouse_url, schema, csv_dir).await?;

    let mut loaded: BTreeMap<String, Table> = BTreeMap::new();
    for name in &requested {
        match source.load(name).await {
            Ok(table) => {
                output::print_info(&format!("Loaded {} ({} rows)", name, table.len()));
                loaded.insert(name.clone(), table);
            }
            // A configured table the source does not have is skipped, not
            // fatal: the suite covers the data actually loaded.
            Err(SourceError::TableNotFound(location)) => {
                output::print_warning(&format!("Skipping {name}: not found at {location}"));
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to load table {name}")),
        }
    }

    if loaded.is_empty() {
        return Err(anyhow!("none of the configured tables could be loaded"));
    }

    let report = run_suite(&loaded, &registry);

    sink::write_report(&report, Path::new(out_dir))?;
    output::print_success(&format!(
        "Report written to {out_dir}/{} and {out_dir}/{}",
        sink::CSV_FILE,
        sink::MARKDOWN_FILE
    ));

    output::print_report(&report, format);
    output::print_summary(&report, loaded.len());

    if report.failed_checks() > 0 || report.missing_columns() > 0 {
        std::process::exit(1);
    }

    Ok(())
}

async fn build_source(
    warehouse_url: Option<&str>,
    schema: &str,
    csv_dir: Option<&str>,
) -> Result<Box<dyn TableSource>> {
    if let Some(dir) = csv_dir {
        output::print_info(&format!("Reading tables from CSV fixtures in {dir}"));
        return Ok(Box::new(CsvSource::new(dir)));
    }

    let url = warehouse_url
        .map(str::to_string)
        .or_else(|| WarehouseConfig::from_env().map(|config| config.url))
        .ok_or_else(|| {
            anyhow!(
                "no warehouse configured: pass --warehouse-url, set DATABASE_URL, \
                 or use --csv-dir"
            )
        })?;

    let config = WarehouseConfig::builder().url(url).schema(schema).build()?;
    let source = PostgresSource::connect(&config)
        .await
        .context("Failed to connect to the warehouse")?;
    Ok(Box::new(source))
}
