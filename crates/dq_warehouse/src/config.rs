//! Configuration for warehouse connections.

use dq_engine::SourceError;
use serde::{Deserialize, Serialize};

fn default_schema() -> String {
    "gold".to_string()
}

/// Connection settings for the relational warehouse holding the gold schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseConfig {
    /// Postgres connection URL
    pub url: String,

    /// Schema holding the business-ready tables
    #[serde(default = "default_schema")]
    pub schema: String,
}

impl WarehouseConfig {
    /// Creates a new builder for `WarehouseConfig`.
    pub fn builder() -> WarehouseConfigBuilder {
        WarehouseConfigBuilder::default()
    }

    /// Reads the connection URL from `DATABASE_URL`, with the default
    /// schema.
    pub fn from_env() -> Option<Self> {
        std::env::var("DATABASE_URL").ok().map(|url| Self {
            url,
            schema: default_schema(),
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.url.is_empty() {
            return Err(SourceError::Connection(
                "connection URL cannot be empty".to_string(),
            ));
        }
        if self.schema.is_empty() {
            return Err(SourceError::Connection(
                "schema cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`WarehouseConfig`].
#[derive(Debug, Default)]
pub struct WarehouseConfigBuilder {
    url: Option<String>,
    schema: Option<String>,
}

impl WarehouseConfigBuilder {
    /// Sets the Postgres connection URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the warehouse schema (defaults to `gold`).
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<WarehouseConfig, SourceError> {
        let config = WarehouseConfig {
            url: self.url.unwrap_or_default(),
            schema: self.schema.unwrap_or_else(default_schema),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_schema_to_gold() {
        let config = WarehouseConfig::builder()
            .url("postgres://localhost:5432/postgres")
            .build()
            .unwrap();
        assert_eq!(config.schema, "gold");
    }

    #[test]
    fn test_builder_rejects_missing_url() {
        let result = WarehouseConfig::builder().schema("gold").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_schema_kept() {
        let config = WarehouseConfig::builder()
            .url("postgres://localhost:5432/postgres")
            .schema("silver")
            .build()
            .unwrap();
        assert_eq!(config.schema, "silver");
    }
}
