//! Store configuration.

use std::env;

use serde::{Deserialize, Serialize};

use super::countries::{is_known_country_code, normalize_country_code};
use super::error::ConfigError;

/// Environment variable holding the store's home country code.
pub const STORE_COUNTRY_ENV: &str = "VAT_MOSS_STORE_COUNTRY_CODE";

/// Settings the assessment needs about the selling store.
///
/// Deserializing validates the country code the same way [`StoreConfig::new`] does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStoreConfig")]
pub struct StoreConfig {
    /// The store's home country (ISO 3166-1 alpha-2, uppercase).
    store_country_code: String,
}

#[derive(Deserialize)]
struct RawStoreConfig {
    store_country_code: String,
}

impl TryFrom<RawStoreConfig> for StoreConfig {
    type Error = ConfigError;

    fn try_from(raw: RawStoreConfig) -> Result<Self, Self::Error> {
        Self::new(raw.store_country_code)
    }
}

impl StoreConfig {
    /// Create a configuration for a store in `country_code`.
    pub fn new(country_code: impl AsRef<str>) -> Result<Self, ConfigError> {
        let code = normalize_country_code(country_code.as_ref());
        if !is_known_country_code(&code) {
            return Err(ConfigError::InvalidCountry(code));
        }
        Ok(Self {
            store_country_code: code,
        })
    }

    /// Load from the process environment ([`STORE_COUNTRY_ENV`]).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load from an arbitrary variable source.
    pub fn from_vars<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let code = get(STORE_COUNTRY_ENV)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing(STORE_COUNTRY_ENV.to_string()))?;
        Self::new(code)
    }

    pub fn store_country_code(&self) -> &str {
        &self.store_country_code
    }

    /// Whether `country_code` is the store's own country (case-insensitive).
    pub fn is_store_country(&self, country_code: &str) -> bool {
        self.store_country_code
            .eq_ignore_ascii_case(country_code.trim())
    }
}
