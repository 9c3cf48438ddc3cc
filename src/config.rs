use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Paths relative to `api.base_url`.
#[derive(Debug, Deserialize, Clone)]
pub struct EndpointConfig {
    #[serde(default = "default_store_users")]
    pub store_users: String,
    #[serde(default = "default_plan")]
    pub plan: String,
    #[serde(default = "default_balance")]
    pub balance: String,
    #[serde(default = "default_renew")]
    pub renew: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            store_users: default_store_users(),
            plan: default_plan(),
            balance: default_balance(),
            renew: default_renew(),
        }
    }
}

fn default_store_users() -> String {
    "seller/store/users".to_string()
}

fn default_plan() -> String {
    "seller/subscription/plan".to_string()
}

fn default_balance() -> String {
    "wallet/balance".to_string()
}

fn default_renew() -> String {
    "seller/subscription/renew".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct AccessConfig {
    #[serde(default = "default_store_role_cache_ttl_secs")]
    pub store_role_cache_ttl_secs: u64,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            store_role_cache_ttl_secs: default_store_role_cache_ttl_secs(),
        }
    }
}

impl AccessConfig {
    pub fn store_role_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.store_role_cache_ttl_secs)
    }
}

fn default_store_role_cache_ttl_secs() -> u64 {
    60
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

fn default_session_path() -> String {
    ".sellerdesk/session.json".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SELLERDESK__API__BASE_URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("api.base_url", "http://localhost:8000/api/")?
            .set_default("api.timeout_secs", 15)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional - ignored if not found
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("SELLERDESK")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(api_url) = env::var("SELLERDESK_API_URL") {
            builder = builder.set_override("api.base_url", api_url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api.base_url.trim().is_empty() {
            return Err("API base URL must not be empty".to_string());
        }
        if url::Url::parse(&self.api.base_url).is_err() {
            return Err(format!("API base URL is not a valid URL: {}", self.api.base_url));
        }
        if self.api.timeout_secs == 0 {
            return Err("API timeout must be greater than 0".to_string());
        }
        if self.access.store_role_cache_ttl_secs == 0 {
            return Err("Store role cache TTL must be greater than 0".to_string());
        }
        Ok(())
    }
}
