//! Boundary trait for loading warehouse tables.

use crate::Table;
use async_trait::async_trait;
use thiserror::Error;

/// Errors a table source can produce.
///
/// Load failures stay outside the evaluator: a source error aborts the
/// driver before any check runs.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The named table does not exist at the source
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// The source could not be reached
    #[error("failed to connect to the warehouse: {0}")]
    Connection(String),

    /// The table exists but its rows could not be read
    #[error("failed to read table '{table}': {message}")]
    Read {
        /// Table being loaded
        table: String,
        /// Underlying failure
        message: String,
    },
}

/// A named-table loading boundary.
///
/// The evaluator only needs column lookup and null-checkability; whether the
/// rows come from a SQL engine, files, or an in-memory fixture is the
/// source's business.
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Loads one table by name.
    async fn load(&self, table: &str) -> Result<Table, SourceError>;
}
