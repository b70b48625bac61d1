//! Client configuration

use std::time::Duration;

use clap::Args;
use rusty_money::iso::{self, Currency};
use storefront::shipping::ShippingPolicy;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Storefront API and pricing settings.
#[derive(Debug, Args)]
pub struct ClientConfig {
    /// Storefront API base URL
    #[arg(
        long,
        env = "STOREFRONT_API_URL",
        default_value = "http://localhost:8000/api"
    )]
    pub api_url: String,

    /// Access token of the signed-in shopper
    #[arg(long, env = "STOREFRONT_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// ISO 4217 code prices are denominated in
    #[arg(long, env = "STOREFRONT_CURRENCY", default_value = "UZS")]
    pub currency: String,

    /// Subtotal, in major units, above which shipping is free
    #[arg(
        long,
        env = "STOREFRONT_FREE_SHIPPING_THRESHOLD",
        default_value_t = 200_000
    )]
    pub free_shipping_threshold: u32,

    /// Flat shipping fee, in major units
    #[arg(long, env = "STOREFRONT_FLAT_SHIPPING_FEE", default_value_t = 15_000)]
    pub flat_shipping_fee: u32,

    /// HTTP request timeout in seconds
    #[arg(long, env = "STOREFRONT_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] for codes outside ISO 4217.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        let code = self.currency.trim().to_ascii_uppercase();

        iso::find(&code).ok_or(ConfigError::UnknownCurrency(code))
    }

    /// Shipping policy priced in the configured currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the currency cannot be resolved.
    pub fn shipping_policy(&self) -> Result<ShippingPolicy<'static>, ConfigError> {
        Ok(ShippingPolicy::from_major(
            self.currency()?,
            i64::from(self.free_shipping_threshold),
            i64::from(self.flat_shipping_fee),
        ))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] when the timeout is zero.
    pub fn request_timeout(&self) -> Result<Duration, ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Duration::from_secs(self.request_timeout_secs))
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
