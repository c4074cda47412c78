//! CSV fixture source: a directory of `<table>.csv` files.
//!
//! Serves offline runs and test fixtures. The header row is the column
//! list; cell values are inferred from their text form.

use async_trait::async_trait;
use chrono::NaiveDate;
use dq_engine::{Row, SourceError, Table, TableSource, Value};
use std::path::PathBuf;
use tracing::info;

/// A table source reading `<table>.csv` files from one directory.
#[derive(Debug, Clone)]
pub struct CsvSource {
    dir: PathBuf,
}

impl CsvSource {
    /// Creates a source over a fixture directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

/// Infers a cell value from its text form: empty fields are null, integers
/// and floats become numbers, `true`/`false` booleans, ISO dates calendar
/// dates, and everything else text.
fn infer_value(field: &str) -> Value {
    if field.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = field.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = field.parse::<f64>() {
        return Value::Float(f);
    }
    match field {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(d) = NaiveDate::parse_from_str(field, "%Y-%m-%d") {
        return Value::Date(d);
    }
    Value::Text(field.to_string())
}

#[async_trait]
impl TableSource for CsvSource {
    async fn load(&self, table: &str) -> Result<Table, SourceError> {
        let path = self.dir.join(format!("{table}.csv"));
        if !path.is_file() {
            return Err(SourceError::TableNotFound(path.display().to_string()));
        }

        let mut reader = csv::Reader::from_path(&path).map_err(|e| SourceError::Read {
            table: table.to_string(),
            message: e.to_string(),
        })?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| SourceError::Read {
                table: table.to_string(),
                message: e.to_string(),
            })?
            .iter()
            .map(str::to_string)
            .collect();

        let mut out = Table::new(headers.clone());
        for record in reader.records() {
            let record = record.map_err(|e| SourceError::Read {
                table: table.to_string(),
                message: e.to_string(),
            })?;

            let mut row = Row::with_capacity(headers.len());
            for (idx, name) in headers.iter().enumerate() {
                row.insert(name.clone(), infer_value(record.get(idx).unwrap_or_default()));
            }
            out.push_row(row);
        }

        info!(table, rows = out.len(), "table loaded from CSV fixture");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_infer_value() {
        assert_eq!(infer_value(""), Value::Null);
        assert_eq!(infer_value("42"), Value::Int(42));
        assert_eq!(infer_value("-1.5"), Value::Float(-1.5));
        assert_eq!(infer_value("true"), Value::Bool(true));
        assert_eq!(
            infer_value("2024-05-31"),
            Value::Date(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap())
        );
        assert_eq!(infer_value("Mountain Bikes"), Value::Text("Mountain Bikes".into()));
    }

    #[tokio::test]
    async fn test_load_csv_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("fact_sales.csv")).unwrap();
        writeln!(file, "sales_order_id,unit_price,order_date").unwrap();
        writeln!(file, "43659,2024.994,2024-05-31").unwrap();
        writeln!(file, "43660,,2024-06-01").unwrap();
        drop(file);

        let source = CsvSource::new(dir.path());
        let table = source.load("fact_sales").await.unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.columns(),
            ["sales_order_id", "unit_price", "order_date"]
        );
        let prices: Vec<&Value> = table.column_values("unit_price").collect();
        assert_eq!(prices, vec![&Value::Float(2024.994), &Value::Null]);
    }

    #[tokio::test]
    async fn test_missing_file_is_table_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvSource::new(dir.path());
        let result = source.load("nope").await;
        assert!(matches!(result, Err(SourceError::TableNotFound(_))));
    }
}
