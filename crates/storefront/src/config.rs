//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `QUICKGRUB_API_URL` - Base URL of the remote menu API
//! - `QUICKGRUB_CURRENCY` - ISO 4217 code for prices (default: USD)
//! - `QUICKGRUB_DELIVERY_FEE` - Fee for home delivery (default: 3.99)
//! - `QUICKGRUB_LANGUAGE` - Default interface language: en, uk, ru (default: en)

use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

use quickgrub_core::{CurrencyCode, Language};

const DEFAULT_DELIVERY_FEE: &str = "3.99";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Menu API base URL, if the catalog is fetched remotely
    pub api_url: Option<Url>,
    /// Currency all catalog prices are in
    pub currency: CurrencyCode,
    /// Fee added for home delivery
    pub delivery_fee: Decimal,
    /// Language used before a user picks one
    pub language: Language,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            currency: CurrencyCode::default(),
            delivery_fee: Decimal::new(399, 2),
            language: Language::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = get_optional_env(&lookup, "QUICKGRUB_API_URL")
            .map(|raw| parse_api_url(&raw))
            .transpose()?;
        let currency = get_env_or_default(&lookup, "QUICKGRUB_CURRENCY", "USD")
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("QUICKGRUB_CURRENCY".to_string(), e.to_string()))?;
        let delivery_fee = parse_delivery_fee(&get_env_or_default(
            &lookup,
            "QUICKGRUB_DELIVERY_FEE",
            DEFAULT_DELIVERY_FEE,
        ))?;
        let language = get_env_or_default(&lookup, "QUICKGRUB_LANGUAGE", "en")
            .parse::<Language>()
            .map_err(|e| ConfigError::InvalidEnvVar("QUICKGRUB_LANGUAGE".to_string(), e.to_string()))?;

        Ok(Self {
            api_url,
            currency,
            delivery_fee,
            language,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional, non-blank variable.
fn get_optional_env<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.trim().is_empty())
}

/// Get a variable with a default value.
fn get_env_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar("QUICKGRUB_API_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "QUICKGRUB_API_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

fn parse_delivery_fee(raw: &str) -> Result<Decimal, ConfigError> {
    let fee = raw
        .trim()
        .parse::<Decimal>()
        .map_err(|e| ConfigError::InvalidEnvVar("QUICKGRUB_DELIVERY_FEE".to_string(), e.to_string()))?;
    if fee.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar(
            "QUICKGRUB_DELIVERY_FEE".to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(fee)
}
