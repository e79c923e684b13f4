// Storefront configuration loaded from environment variables
// A .env file is honoured by the binary through dotenv before this runs

use std::time::Duration;

use crate::orders::OrderType;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_ID: i32 = 1;
pub const DEFAULT_USER_NAME: &str = "Coffee Lover";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value '{value}': {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for one storefront session
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// Base URL of the backend API, without trailing slash
    pub api_url: String,
    pub request_timeout: Duration,
    pub user_id: i32,
    pub user_name: String,
    pub order_type: OrderType,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_id: DEFAULT_USER_ID,
            user_name: DEFAULT_USER_NAME.to_string(),
            order_type: OrderType::default(),
        }
    }
}

impl StorefrontConfig {
    /// Read the configuration from the process environment
    ///
    /// # Environment
    /// - `STOREFRONT_API_URL` (default `http://localhost:5000/api`)
    /// - `STOREFRONT_REQUEST_TIMEOUT_SECS` (default 10, must be positive)
    /// - `STOREFRONT_USER_ID` (default 1)
    /// - `STOREFRONT_USER_NAME` (default `Coffee Lover`)
    /// - `STOREFRONT_ORDER_TYPE` (`pickup`, `delivery` or `dine_in`; default `pickup`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup; unset or blank keys take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let api_url = get("STOREFRONT_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let request_timeout = match get("STOREFRONT_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "STOREFRONT_REQUEST_TIMEOUT_SECS",
                    value: raw.clone(),
                    reason: "expected a whole number of seconds".to_string(),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "STOREFRONT_REQUEST_TIMEOUT_SECS",
                        value: raw,
                        reason: "must be greater than 0".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => defaults.request_timeout,
        };

        let user_id = match get("STOREFRONT_USER_ID") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "STOREFRONT_USER_ID",
                value: raw.clone(),
                reason: "expected an integer".to_string(),
            })?,
            None => defaults.user_id,
        };

        let user_name = get("STOREFRONT_USER_NAME").unwrap_or(defaults.user_name);

        let order_type = match get("STOREFRONT_ORDER_TYPE") {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::InvalidValue {
                key: "STOREFRONT_ORDER_TYPE",
                value: raw.clone(),
                reason,
            })?,
            None => defaults.order_type,
        };

        Ok(Self {
            api_url,
            request_timeout,
            user_id,
            user_name,
            order_type,
        })
    }
}
