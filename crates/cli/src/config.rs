//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `GREENLEAF_STORAGE_PATH` - Storage file holding the cart (default: .greenleaf/storage.json)
//! - `GREENLEAF_CURRENCY` - Shop currency for display (default: RUB)
//! - `GREENLEAF_FREE_DELIVERY_MIN` - Subtotal for free delivery, 0 disables (default: 0)
//! - `GREENLEAF_DELIVERY_PRICE` - Base delivery price (default: 0)
//! - `GREENLEAF_COURIER_DELIVERY_PRICE` - Courier surcharge (default: 0)
//! - `GREENLEAF_PREORDER_ENABLED` - Take a 50% deposit at checkout (default: false)
//! - `GREENLEAF_CASH_CITY` - Only city where cash on delivery is accepted

use std::path::PathBuf;
use std::str::FromStr;

use greenleaf_cart::checkout::DeliverySettings;
use greenleaf_core::CurrencyCode;
use rust_decimal::Decimal;
use thiserror::Error;

const DEFAULT_STORAGE_PATH: &str = ".greenleaf/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// File backing the cart storage
    pub storage_path: PathBuf,
    /// Shop currency used when printing prices
    pub currency: CurrencyCode,
    /// Delivery and payment settings for checkout quotes
    pub delivery: DeliverySettings,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage_path =
            PathBuf::from(get_env_or_default("GREENLEAF_STORAGE_PATH", DEFAULT_STORAGE_PATH));
        let currency = parse_currency(
            "GREENLEAF_CURRENCY",
            &get_env_or_default("GREENLEAF_CURRENCY", "RUB"),
        )?;

        let delivery = DeliverySettings {
            free_delivery_min: parse_decimal(
                "GREENLEAF_FREE_DELIVERY_MIN",
                &get_env_or_default("GREENLEAF_FREE_DELIVERY_MIN", "0"),
            )?,
            delivery_price: parse_decimal(
                "GREENLEAF_DELIVERY_PRICE",
                &get_env_or_default("GREENLEAF_DELIVERY_PRICE", "0"),
            )?,
            courier_delivery_price: parse_decimal(
                "GREENLEAF_COURIER_DELIVERY_PRICE",
                &get_env_or_default("GREENLEAF_COURIER_DELIVERY_PRICE", "0"),
            )?,
            preorder_enabled: parse_bool(
                "GREENLEAF_PREORDER_ENABLED",
                &get_env_or_default("GREENLEAF_PREORDER_ENABLED", "false"),
            )?,
            cash_city: get_optional_env("GREENLEAF_CASH_CITY").filter(|c| !c.trim().is_empty()),
        };

        Ok(Self {
            storage_path,
            currency,
            delivery,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_decimal(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    let amount = Decimal::from_str(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if amount.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(amount)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

fn parse_currency(key: &str, value: &str) -> Result<CurrencyCode, ConfigError> {
    value
        .parse()
        .map_err(|e: greenleaf_core::CurrencyCodeError| {
            ConfigError::InvalidEnvVar(key.to_string(), e.to_string())
        })
}
