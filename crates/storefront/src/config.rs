//! Environment-driven configuration.

use std::path::PathBuf;

use rust_decimal::Decimal;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidEnvVar { name: &'static str, value: String },
}

/// Storefront settings, read once at startup.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Path of the JSON state file.
    pub data_file: PathBuf,
    /// Primary catalog endpoint, returning a JSON array of products.
    pub products_url: String,
    /// Optional fallback document consulted when the primary endpoint fails.
    pub static_db_url: Option<String>,
    /// Freight applied at checkout when none is stored or given.
    pub default_freight: Decimal,
}

impl StorefrontConfig {
    /// Load configuration from the environment, reading `.env` first.
    /// Unset variables fall back to local-development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine; real variables win over it.
        dotenvy::dotenv().ok();

        let data_file = std::env::var("JABUTICABA_DATA_FILE")
            .map_or_else(|_| PathBuf::from("jabuticaba.json"), PathBuf::from);

        let products_url = std::env::var("JABUTICABA_PRODUCTS_URL")
            .unwrap_or_else(|_| "http://localhost:3000/products".to_owned());

        let static_db_url = std::env::var("JABUTICABA_STATIC_DB_URL").ok();

        let default_freight = match std::env::var("JABUTICABA_DEFAULT_FREIGHT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnvVar {
                    name: "JABUTICABA_DEFAULT_FREIGHT",
                    value: raw,
                })?,
            Err(_) => Decimal::ZERO,
        };

        Ok(Self {
            data_file,
            products_url,
            static_db_url,
            default_freight,
        })
    }
}
