//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CARTWIRE_BASE_URL` - Backend origin serving `/api/cart/*` (default: http://127.0.0.1:8000)
//! - `CARTWIRE_SESSION_COOKIE` - Raw `Cookie` header value forwarded with every request
//! - `CARTWIRE_CURRENCY` - ISO 4217 code used to render prices (default: USD)

use cartwire_core::CurrencyCode;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart API client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin; endpoint paths are resolved against it
    pub base_url: Url,
    /// Session cookie forwarded as-is (the backend owns session handling)
    pub session_cookie: Option<SecretString>,
    /// Currency used to render prices on the page
    pub currency_code: CurrencyCode,
}

impl ClientConfig {
    /// Configuration for `base_url` with no session and USD prices.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            session_cookie: None,
            currency_code: CurrencyCode::USD,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_base_url =
            lookup("CARTWIRE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = parse_base_url(&raw_base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CARTWIRE_BASE_URL".to_string(), e))?;

        let session_cookie = lookup("CARTWIRE_SESSION_COOKIE")
            .filter(|value| !value.trim().is_empty())
            .map(SecretString::from);

        let currency_code = match lookup("CARTWIRE_CURRENCY") {
            Some(code) => parse_currency(&code).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "CARTWIRE_CURRENCY".to_string(),
                    format!("unsupported currency code '{code}'"),
                )
            })?,
            None => CurrencyCode::default(),
        };

        Ok(Self {
            base_url,
            session_cookie,
            currency_code,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse the backend origin, requiring an http(s) URL with a host.
fn parse_base_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("URL must have a host".to_string());
    }
    Ok(url)
}

fn parse_currency(code: &str) -> Option<CurrencyCode> {
    match code.trim().to_ascii_uppercase().as_str() {
        "USD" => Some(CurrencyCode::USD),
        "EUR" => Some(CurrencyCode::EUR),
        "GBP" => Some(CurrencyCode::GBP),
        "CAD" => Some(CurrencyCode::CAD),
        "AUD" => Some(CurrencyCode::AUD),
        _ => None,
    }
}
