//! Client configuration
//!
//! Settings are read from a TOML file (`screentab.toml` by default). Every
//! field has a default, so an empty file is a valid configuration. On native
//! builds a `.env` file is loaded first and a few environment variables
//! override the file.
//!
//! ```toml
//! [server]
//! base_url = "https://api.screentab.app"
//! request_timeout_secs = 30
//!
//! [navigation]
//! fallback_settle_ms = 600
//!
//! [users]
//! page_size = 15
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "screentab.toml";

pub const ENV_SERVER_URL: &str = "SCREENTAB_SERVER_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "SCREENTAB_REQUEST_TIMEOUT_SECS";

/// Root configuration structure loaded from screentab.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub users: UsersConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the identity and chat backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

// ============= Navigation Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// How long a same-route refresh keeps the overlay up, in milliseconds
    #[serde(default = "default_fallback_settle_ms")]
    pub fallback_settle_ms: u64,
}

fn default_fallback_settle_ms() -> u64 {
    600
}

impl NavigationConfig {
    pub fn fallback_settle(&self) -> Duration {
        Duration::from_millis(self.fallback_settle_ms)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            fallback_settle_ms: default_fallback_settle_ms(),
        }
    }
}

// ============= Users Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsersConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    15
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

// ============= Logging Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ============= Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Environment variable '{0}' has an invalid value: {1}")]
    InvalidEnv(&'static str, String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ClientConfig {
    /// Load configuration from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse without touching the filesystem or the environment.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: ClientConfig = toml::from_str(content)?;
        config.server.base_url = config.server.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Load the file (if present), then apply `.env` and environment overrides.
    ///
    /// A missing file is not an error here; defaults are used instead.
    #[cfg(feature = "native")]
    pub fn from_env_and_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::from_toml(&fs::read_to_string(path)?)?
        } else {
            tracing::debug!("No config file at {:?}, using defaults", path);
            Self::default()
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through a lookup function.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_SERVER_URL) {
            self.server.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT) {
            self.server.request_timeout_secs = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv(ENV_REQUEST_TIMEOUT, raw.clone()))?;
        }
        Ok(())
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.server.base_url;
        if url.is_empty() {
            return Err(ConfigError::Validation(
                "server.base_url must not be empty".to_string(),
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "server.base_url must be an http(s) URL, got '{url}'"
            )));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "server.request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.users.page_size == 0 {
            return Err(ConfigError::Validation(
                "users.page_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn empty_file_yields_valid_defaults() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.navigation.fallback_settle(), Duration::from_millis(600));
        assert_eq!(config.users.page_size, 15);
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        let config = ClientConfig::from_toml(
            r#"
[server]
base_url = "https://api.screentab.app///"
"#,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "https://api.screentab.app");
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = ClientConfig::default();
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_SERVER_URL, "https://staging.screentab.app/"),
            (ENV_REQUEST_TIMEOUT, "5"),
        ]);
        config
            .apply_env(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.base_url, "https://staging.screentab.app");
        assert_eq!(config.server.request_timeout_secs, 5);
    }

    #[test]
    fn bad_timeout_env_is_reported() {
        let mut config = ClientConfig::default();
        let result = config.apply_env(|name| {
            (name == ENV_REQUEST_TIMEOUT).then(|| "soon".to_string())
        });
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnv(ENV_REQUEST_TIMEOUT, _))
        ));
    }

    #[test]
    fn validation_rejects_nonsense() {
        let mut config = ClientConfig::default();
        config.server.base_url = "ftp://files".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = ClientConfig::default();
        config.users.page_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
base_url = "http://127.0.0.1:9999"

[navigation]
fallback_settle_ms = 250

[logging]
level = "debug"
json = true
"#
        )
        .unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.server.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.navigation.fallback_settle_ms, 250);
        assert!(config.logging.json);
    }

    #[test]
    fn missing_file_is_an_error_for_load() {
        let result = ClientConfig::load("/definitely/not/here/screentab.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
