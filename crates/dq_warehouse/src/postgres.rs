//! Postgres table source for the gold schema.
//!
//! Loads `SELECT *`-equivalent row sets into the engine's table
//! representation. The column list is taken from `information_schema` first,
//! so an empty table still surfaces its columns, and types the engine does
//! not model (numerics, timestamps, uuids) are cast in SQL to a decodable
//! form.

use crate::WarehouseConfig;
use async_trait::async_trait;
use chrono::NaiveDate;
use dq_engine::{Row, SourceError, Table, TableSource, Value};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row as _;
use tracing::info;

/// A table source backed by a Postgres warehouse.
pub struct PostgresSource {
    pool: PgPool,
    schema: String,
}

impl PostgresSource {
    /// Connects a small pool to the warehouse.
    pub async fn connect(config: &WarehouseConfig) -> Result<Self, SourceError> {
        config.validate()?;
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect(&config.url)
            .await
            .map_err(|e| SourceError::Connection(e.to_string()))?;
        info!(schema = %config.schema, "connected to warehouse");
        Ok(Self {
            pool,
            schema: config.schema.clone(),
        })
    }

    /// Wraps an existing pool.
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        Self {
            pool,
            schema: schema.into(),
        }
    }

    /// The column plan for a table, in ordinal order.
    async fn table_columns(&self, table: &str) -> Result<Vec<LoadColumn>, SourceError> {
        let rows = sqlx::query(
            "select column_name, data_type \
             from information_schema.columns \
             where table_schema = $1 and table_name = $2 \
             order by ordinal_position",
        )
        .bind(&self.schema)
        .bind(table)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SourceError::Read {
            table: table.to_string(),
            message: e.to_string(),
        })?;

        rows.iter()
            .map(|row| {
                let name: String = row.try_get("column_name").map_err(|e| SourceError::Read {
                    table: table.to_string(),
                    message: e.to_string(),
                })?;
                let data_type: String = row.try_get("data_type").map_err(|e| SourceError::Read {
                    table: table.to_string(),
                    message: e.to_string(),
                })?;
                Ok(plan_column(name, &data_type))
            })
            .collect()
    }
}

#[async_trait]
impl TableSource for PostgresSource {
    async fn load(&self, table: &str) -> Result<Table, SourceError> {
        let columns = self.table_columns(table).await?;
        if columns.is_empty() {
            return Err(SourceError::TableNotFound(format!(
                "{}.{}",
                self.schema, table
            )));
        }

        let select_list: Vec<String> = columns.iter().map(LoadColumn::select_expr).collect();
        let sql = format!(
            "SELECT {} FROM {}.{}",
            select_list.join(", "),
            quote_ident(&self.schema),
            quote_ident(table)
        );

        let pg_rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SourceError::Read {
                table: table.to_string(),
                message: e.to_string(),
            })?;

        let mut out = Table::new(columns.iter().map(|c| c.name.clone()).collect());
        for pg_row in &pg_rows {
            let mut row = Row::with_capacity(columns.len());
            for (idx, column) in columns.iter().enumerate() {
                let value =
                    decode_value(pg_row, idx, column.decode).map_err(|e| SourceError::Read {
                        table: table.to_string(),
                        message: e.to_string(),
                    })?;
                row.insert(column.name.clone(), value);
            }
            out.push_row(row);
        }

        info!(table, rows = out.len(), "table loaded from warehouse");
        Ok(out)
    }
}

/// How a column decodes into an engine value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decode {
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Bool,
    Date,
    Text,
}

/// One column of the select plan.
#[derive(Debug, Clone, PartialEq)]
struct LoadColumn {
    name: String,
    decode: Decode,
    /// SQL cast applied for types the engine does not model directly
    cast: Option<&'static str>,
}

impl LoadColumn {
    fn select_expr(&self) -> String {
        let ident = quote_ident(&self.name);
        match self.cast {
            Some(cast) => format!("{ident}::{cast} AS {ident}"),
            None => ident,
        }
    }
}

/// Maps an `information_schema` data type to a decode plan.
fn plan_column(name: String, data_type: &str) -> LoadColumn {
    let (decode, cast) = match data_type {
        "smallint" => (Decode::Int2, None),
        "integer" => (Decode::Int4, None),
        "bigint" => (Decode::Int8, None),
        "real" => (Decode::Float4, None),
        "double precision" => (Decode::Float8, None),
        "numeric" => (Decode::Float8, Some("float8")),
        "boolean" => (Decode::Bool, None),
        "date" => (Decode::Date, None),
        "text" | "character varying" | "character" => (Decode::Text, None),
        _ => (Decode::Text, Some("text")),
    };
    LoadColumn { name, decode, cast }
}

/// Quotes an identifier for interpolation into SQL.
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn decode_value(row: &PgRow, idx: usize, decode: Decode) -> Result<Value, sqlx::Error> {
    Ok(match decode {
        Decode::Int2 => row
            .try_get::<Option<i16>, _>(idx)?
            .map_or(Value::Null, |v| Value::Int(i64::from(v))),
        Decode::Int4 => row
            .try_get::<Option<i32>, _>(idx)?
            .map_or(Value::Null, |v| Value::Int(i64::from(v))),
        Decode::Int8 => row
            .try_get::<Option<i64>, _>(idx)?
            .map_or(Value::Null, Value::Int),
        Decode::Float4 => row
            .try_get::<Option<f32>, _>(idx)?
            .map_or(Value::Null, |v| Value::Float(f64::from(v))),
        Decode::Float8 => row
            .try_get::<Option<f64>, _>(idx)?
            .map_or(Value::Null, Value::Float),
        Decode::Bool => row
            .try_get::<Option<bool>, _>(idx)?
            .map_or(Value::Null, Value::Bool),
        Decode::Date => row
            .try_get::<Option<NaiveDate>, _>(idx)?
            .map_or(Value::Null, Value::Date),
        Decode::Text => row
            .try_get::<Option<String>, _>(idx)?
            .map_or(Value::Null, Value::Text),
    })
}
