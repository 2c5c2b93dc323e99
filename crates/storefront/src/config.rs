//! Storefront configuration.
//!
//! Defaults cover the demo shop; environment variables override them at
//! startup:
//!
//! - `GREENNEST_BRAND`: shop name in the header and landing page
//! - `GREENNEST_CURRENCY`: symbol printed before prices
//! - `GREENNEST_LOG_FORMAT`: `json` or `compact`
//! - `GREENNEST_LOG`: fallback log filter when `RUST_LOG` is unset
//! - `GREENNEST_CATALOG`: path to a JSON product list replacing the built-in seed

use std::path::PathBuf;

use thiserror::Error;

use greennest_catalog::Catalog;
use greennest_core::DomainError;
use greennest_observability::LogFormat;

pub const ENV_BRAND: &str = "GREENNEST_BRAND";
pub const ENV_CURRENCY: &str = "GREENNEST_CURRENCY";
pub const ENV_LOG_FORMAT: &str = "GREENNEST_LOG_FORMAT";
pub const ENV_LOG_FILTER: &str = "GREENNEST_LOG";
pub const ENV_CATALOG: &str = "GREENNEST_CATALOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("failed to read catalog file {path:?}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog file rejected: {0}")]
    Catalog(#[from] DomainError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub brand: String,
    pub currency_symbol: String,
    pub log_format: LogFormat,
    pub log_filter: String,
    pub catalog_path: Option<PathBuf>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            brand: "GreenNest".to_string(),
            currency_symbol: "₹".to_string(),
            log_format: LogFormat::Compact,
            log_filter: "warn".to_string(),
            catalog_path: None,
        }
    }
}

impl StorefrontConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each known key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(brand) = non_empty(lookup(ENV_BRAND)) {
            config.brand = brand;
        }

        if let Some(symbol) = lookup(ENV_CURRENCY) {
            // An empty symbol is allowed: prices then print as bare numbers.
            config.currency_symbol = symbol;
        }

        if let Some(format) = non_empty(lookup(ENV_LOG_FORMAT)) {
            config.log_format = format.parse().map_err(|message| ConfigError::InvalidValue {
                key: ENV_LOG_FORMAT,
                message,
            })?;
        }

        if let Some(filter) = non_empty(lookup(ENV_LOG_FILTER)) {
            greennest_observability::validate_filter(&filter).map_err(|message| {
                ConfigError::InvalidValue {
                    key: ENV_LOG_FILTER,
                    message,
                }
            })?;
            config.log_filter = filter;
        }

        config.catalog_path = non_empty(lookup(ENV_CATALOG)).map(PathBuf::from);

        Ok(config)
    }

    /// The catalog to serve: the JSON file when configured, else the seed.
    ///
    /// Read once at startup; the returned catalog is never mutated.
    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        let Some(path) = &self.catalog_path else {
            return Ok(Catalog::seed());
        };

        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::CatalogRead {
            path: path.clone(),
            source,
        })?;
        let catalog = Catalog::from_json(&json)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "loaded catalog file");
        Ok(catalog)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
