//! Application configuration.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Backend API configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// Image URL handling.
    #[serde(default)]
    pub images: ImageConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Image URL rewriting.
///
/// Records created from the mobile app carry image URLs pointing at the
/// Android emulator's host alias, which is unreachable from a desktop.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    /// Prefix to replace.
    #[serde(default = "default_rewrite_from")]
    pub rewrite_from: String,
    /// Replacement prefix.
    #[serde(default = "default_rewrite_to")]
    pub rewrite_to: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            rewrite_from: default_rewrite_from(),
            rewrite_to: default_rewrite_to(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("smartcity-admin/{}", env!("CARGO_PKG_VERSION"))
}

fn default_rewrite_from() -> String {
    "http://10.0.2.2:5000".to_string()
}

fn default_rewrite_to() -> String {
    "http://localhost:5000".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` in the working directory (if present)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `SMARTCITY_ENV`)
    /// 4. Environment variables with `SMARTCITY_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        let env = std::env::var("SMARTCITY_ENV").unwrap_or_else(|_| "development".to_string());
        debug!(environment = %env, "Loading configuration");

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(environment())
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        config.try_deserialize()
    }

    /// Replace the backend base URL, dropping any trailing slash.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.api.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

/// `SMARTCITY_<SECTION>__<KEY>` variables, e.g. `SMARTCITY_API__BASE_URL`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("SMARTCITY")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.api.user_agent.starts_with("smartcity-admin/"));
        assert_eq!(config.images.rewrite_from, "http://10.0.2.2:5000");
        assert_eq!(config.images.rewrite_to, "http://localhost:5000");
    }

    #[test]
    fn test_with_base_url_trims_slash() {
        let config = Config::default().with_base_url("https://city.example.com/api/");
        assert_eq!(config.api.base_url, "https://city.example.com/api");
    }

    #[test]
    fn test_environment_overrides_nested_keys() {
        let vars = config::Map::from([
            (
                "SMARTCITY_API__BASE_URL".to_string(),
                "https://override.example.com/api".to_string(),
            ),
            ("SMARTCITY_API__TIMEOUT_SECS".to_string(), "5".to_string()),
            ("SMARTCITY_ENV".to_string(), "production".to_string()),
        ]);
        let source = config::Config::builder()
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap();
        let config: Config = source.try_deserialize().unwrap();

        assert_eq!(config.api.base_url, "https://override.example.com/api");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.images.rewrite_from, "http://10.0.2.2:5000");
    }

    #[test]
    fn test_partial_sections_fall_back_to_defaults() {
        let source = config::Config::builder()
            .add_source(config::File::from_str(
                "[api]\nbase_url = \"https://backend.example.com/api\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: Config = source.try_deserialize().unwrap();

        assert_eq!(config.api.base_url, "https://backend.example.com/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.images.rewrite_to, "http://localhost:5000");
    }
}
