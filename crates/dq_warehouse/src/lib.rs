//! Warehouse integration for the gold-schema data-quality suite.
//!
//! This crate implements the table-loading boundary: fetching named tables
//! into the engine's in-memory representation. Two sources are provided:
//! a live Postgres warehouse holding the gold schema, and a directory of
//! CSV fixtures for offline runs and tests.
//!
//! # Example
//!
//! ```no_run
//! use dq_engine::TableSource;
//! use dq_warehouse::{PostgresSource, WarehouseConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = WarehouseConfig::builder()
//!     .url("postgres://warehouse:5432/analytics")
//!     .schema("gold")
//!     .build()?;
//!
//! let source = PostgresSource::connect(&config).await?;
//! let fact_sales = source.load("fact_sales").await?;
//! println!("loaded {} rows", fact_sales.len());
//! # Ok(())
//! # }
//! ```

mod config;
mod csv_source;
mod postgres;

pub use config::{WarehouseConfig, WarehouseConfigBuilder};
pub use csv_source::CsvSource;
pub use postgres::PostgresSource;
