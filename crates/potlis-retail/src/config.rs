//! Configuration for retail availability lookups

use crate::error::{Result, RetailError};
use chrono_tz::Tz;
use potlis_utils::{optional_var, parse_var};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Placeholders expected in the stock URL template
pub const STOCK_PLACEHOLDERS: [&str; 2] = ["{location}", "{skus}"];

const DEFAULT_PRODUCT_API: &str = "https://www.bestbuy.ca/api/v2/json/search?categoryid={category}\
    &currentRegion=ON&lang=en-CA&page=1&pageSize={max}&query={query}&sortBy=relevance&sortDir=desc";
const DEFAULT_STOCK_API: &str = "https://www.bestbuy.ca/ecomm-api/availability/products\
    ?accept-language=en-CA&locations={location}&skus={skus}";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15";

/// Configuration for the retail availability pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetailConfig {
    /// Catalog search URL template (`{category}`, `{max}`, `{query}`)
    pub product_api: String,

    /// Stock lookup URL template (`{location}`, `{skus}`)
    pub stock_api: String,

    /// Store/location identifier sent with every stock lookup
    pub default_location: String,

    /// Storefront base URL that relative product paths are appended to
    pub base_url: String,

    /// Timezone used for the "requested at" footer
    pub timezone: Tz,

    /// User agent sent to both APIs
    pub user_agent: String,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Result cap for unprivileged callers, also the default max-count
    pub default_max_results: u32,

    /// Maximum display units per delivered message
    pub batch_limit: usize,

    /// Description length before truncation
    pub description_limit: usize,
}

impl Default for RetailConfig {
    fn default() -> Self {
        Self {
            product_api: DEFAULT_PRODUCT_API.to_string(),
            stock_api: DEFAULT_STOCK_API.to_string(),
            default_location: "977".to_string(),
            base_url: "https://www.bestbuy.ca".to_string(),
            timezone: chrono_tz::US::Eastern,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(30),
            default_max_results: 10,
            batch_limit: 10,
            description_limit: 140,
        }
    }
}

impl RetailConfig {
    /// Create a new configuration builder
    pub fn builder() -> RetailConfigBuilder {
        RetailConfigBuilder::default()
    }

    /// Build a validated configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for placeholder in ["{max}", "{query}"] {
            if !self.product_api.contains(placeholder) {
                return Err(RetailError::ConfigError(format!(
                    "product API template is missing {placeholder}"
                )));
            }
        }

        for placeholder in STOCK_PLACEHOLDERS {
            if !self.stock_api.contains(placeholder) {
                return Err(RetailError::ConfigError(format!(
                    "stock API template is missing {placeholder}"
                )));
            }
        }

        if self.default_location.trim().is_empty() {
            return Err(RetailError::ConfigError(
                "default store location must not be empty".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(RetailError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.default_max_results == 0 || self.batch_limit == 0 {
            return Err(RetailError::ConfigError(
                "default_max_results and batch_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for RetailConfig
#[derive(Debug, Default)]
pub struct RetailConfigBuilder {
    product_api: Option<String>,
    stock_api: Option<String>,
    default_location: Option<String>,
    base_url: Option<String>,
    timezone: Option<String>,
    user_agent: Option<String>,
    request_timeout: Option<Duration>,
    default_max_results: Option<u32>,
    batch_limit: Option<usize>,
    description_limit: Option<usize>,
    env_error: Option<RetailError>,
}

impl RetailConfigBuilder {
    /// Set the catalog URL template
    pub fn product_api(mut self, template: impl Into<String>) -> Self {
        self.product_api = Some(template.into());
        self
    }

    /// Set the stock URL template
    pub fn stock_api(mut self, template: impl Into<String>) -> Self {
        self.stock_api = Some(template.into());
        self
    }

    /// Set the default store location
    pub fn default_location(mut self, location: impl Into<String>) -> Self {
        self.default_location = Some(location.into());
        self
    }

    /// Set the storefront base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the footer timezone by IANA name, e.g. `US/Eastern`
    pub fn timezone(mut self, name: impl Into<String>) -> Self {
        self.timezone = Some(name.into());
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the unprivileged result cap
    pub fn default_max_results(mut self, max: u32) -> Self {
        self.default_max_results = Some(max);
        self
    }

    /// Set the per-message display unit limit
    pub fn batch_limit(mut self, limit: usize) -> Self {
        self.batch_limit = Some(limit);
        self
    }

    /// Set the description truncation length
    pub fn description_limit(mut self, limit: usize) -> Self {
        self.description_limit = Some(limit);
        self
    }

    /// Load settings from environment variables
    ///
    /// Reads `BB_PRODUCT_API`, `BB_STOCK_API`, `DEFAULT_STORE_LOCATION`,
    /// `BB_BASE_URL`, `POTLIS_TIMEZONE` and `POTLIS_REQUEST_TIMEOUT_SECS`.
    /// Unset variables keep whatever the builder already holds.
    pub fn with_env(mut self) -> Self {
        if let Some(template) = optional_var("BB_PRODUCT_API") {
            self.product_api = Some(template);
        }
        if let Some(template) = optional_var("BB_STOCK_API") {
            self.stock_api = Some(template);
        }
        if let Some(location) = optional_var("DEFAULT_STORE_LOCATION") {
            self.default_location = Some(location);
        }
        if let Some(url) = optional_var("BB_BASE_URL") {
            self.base_url = Some(url);
        }
        if let Some(tz) = optional_var("POTLIS_TIMEZONE") {
            self.timezone = Some(tz);
        }
        match parse_var::<u64>("POTLIS_REQUEST_TIMEOUT_SECS") {
            Ok(Some(secs)) => self.request_timeout = Some(Duration::from_secs(secs)),
            Ok(None) => {}
            Err(e) => self.env_error = Some(e.into()),
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<RetailConfig> {
        if let Some(err) = self.env_error {
            return Err(err);
        }

        let defaults = RetailConfig::default();

        let timezone = match self.timezone {
            Some(name) => name.parse::<Tz>().map_err(|e| {
                RetailError::ConfigError(format!("invalid timezone {name:?}: {e}"))
            })?,
            None => defaults.timezone,
        };

        let config = RetailConfig {
            product_api: self.product_api.unwrap_or(defaults.product_api),
            stock_api: self.stock_api.unwrap_or(defaults.stock_api),
            default_location: self.default_location.unwrap_or(defaults.default_location),
            base_url: self
                .base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            timezone,
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            default_max_results: self
                .default_max_results
                .unwrap_or(defaults.default_max_results),
            batch_limit: self.batch_limit.unwrap_or(defaults.batch_limit),
            description_limit: self.description_limit.unwrap_or(defaults.description_limit),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RetailConfig::default();
        assert_eq!(config.default_max_results, 10);
        assert_eq!(config.batch_limit, 10);
        assert_eq!(config.description_limit, 140);
        assert_eq!(config.timezone, chrono_tz::US::Eastern);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = RetailConfig::builder()
            .default_location("203")
            .base_url("https://shop.example.com/")
            .timezone("Europe/Paris")
            .request_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.default_location, "203");
        assert_eq!(config.base_url, "https://shop.example.com");
        assert_eq!(config.timezone, chrono_tz::Europe::Paris);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timezone() {
        let result = RetailConfig::builder().timezone("Mars/Olympus").build();
        assert!(matches!(result, Err(RetailError::ConfigError(_))));
    }

    #[test]
    fn test_validation_missing_placeholder() {
        let config = RetailConfig {
            stock_api: "https://stock.example.com/?skus={skus}".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RetailConfig {
            product_api: "https://shop.example.com/search?q=fixed".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_values() {
        let config = RetailConfig {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let result = RetailConfig::builder().batch_limit(0).build();
        assert!(result.is_err());
    }
}
