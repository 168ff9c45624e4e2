//! # Storefront Configuration
//!
//! Loaded once from `JOBICA_*` environment variables at startup and
//! read-only afterwards.
//!
//! | Variable | Default |
//! |---|---|
//! | `JOBICA_HOST` | `127.0.0.1` |
//! | `JOBICA_PORT` | `3000` |
//! | `JOBICA_CATALOG_PATH` | `./data/products.json` |
//! | `JOBICA_STORE_NAME` | `JOBICA FOODS` |
//! | `JOBICA_WHATSAPP_NUMBER` | `2347065096131` |
//! | `JOBICA_CURRENCY_SYMBOL` | `₦` |
//! | `JOBICA_LEGACY_BUNDLE_PRICING` | `false` |
//! | `JOBICA_CART_IDLE_MINUTES` | `1440` |
//! | `JOBICA_MAX_CARTS` | `10000` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use jobica_core::money::NAIRA_SYMBOL;
use jobica_core::validation::validate_whatsapp_number;
use jobica_core::{Money, PricingPolicy};
use serde::Serialize;

/// Storefront configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    pub host: IpAddr,
    pub port: u16,

    /// Catalog file. `None` keeps the catalog in memory.
    pub catalog_path: Option<PathBuf>,

    /// Name used in order slips and inquiry greetings.
    pub store_name: String,

    /// Order line, country code first, digits only.
    pub whatsapp_number: String,

    pub currency_symbol: String,

    /// Enables the old "Larsor Chicken: 5 for ₦800" override.
    pub legacy_bundle_pricing: bool,

    /// Carts untouched this long are dropped.
    pub cart_idle_minutes: u64,

    /// Open carts kept at once; the stalest is dropped to make room.
    pub max_carts: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            catalog_path: Some(PathBuf::from("./data/products.json")),
            store_name: "JOBICA FOODS".to_string(),
            whatsapp_number: "2347065096131".to_string(),
            currency_symbol: NAIRA_SYMBOL.to_string(),
            legacy_bundle_pricing: false,
            cart_idle_minutes: 24 * 60,
            max_carts: 10_000,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = StorefrontConfig::default();

        let config = StorefrontConfig {
            host: parse_or(&lookup, "JOBICA_HOST", defaults.host)?,
            port: parse_or(&lookup, "JOBICA_PORT", defaults.port)?,
            catalog_path: lookup("JOBICA_CATALOG_PATH")
                .map(PathBuf::from)
                .or(defaults.catalog_path),
            store_name: lookup("JOBICA_STORE_NAME").unwrap_or(defaults.store_name),
            whatsapp_number: lookup("JOBICA_WHATSAPP_NUMBER").unwrap_or(defaults.whatsapp_number),
            currency_symbol: lookup("JOBICA_CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
            legacy_bundle_pricing: parse_or(
                &lookup,
                "JOBICA_LEGACY_BUNDLE_PRICING",
                defaults.legacy_bundle_pricing,
            )?,
            cart_idle_minutes: parse_or(
                &lookup,
                "JOBICA_CART_IDLE_MINUTES",
                defaults.cart_idle_minutes,
            )?,
            max_carts: parse_or(&lookup, "JOBICA_MAX_CARTS", defaults.max_carts)?,
        };

        if config.store_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue("JOBICA_STORE_NAME".to_string()));
        }
        if config.cart_idle_minutes == 0 {
            return Err(ConfigError::InvalidValue("JOBICA_CART_IDLE_MINUTES".to_string()));
        }
        if config.max_carts == 0 {
            return Err(ConfigError::InvalidValue("JOBICA_MAX_CARTS".to_string()));
        }
        validate_whatsapp_number(&config.whatsapp_number)
            .map_err(|_| ConfigError::InvalidValue("JOBICA_WHATSAPP_NUMBER".to_string()))?;

        Ok(config)
    }

    /// In-memory catalog, otherwise defaults (for tests).
    pub fn in_memory() -> Self {
        StorefrontConfig {
            catalog_path: None,
            ..Default::default()
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn pricing_policy(&self) -> PricingPolicy {
        if self.legacy_bundle_pricing {
            PricingPolicy::LegacyNameOverride
        } else {
            PricingPolicy::Tiered
        }
    }

    pub fn cart_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.cart_idle_minutes * 60)
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust
    /// use jobica_core::Money;
    /// use jobica_storefront::config::StorefrontConfig;
    ///
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(Money::from_kobo(123_450)), "₦1,234.50");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
