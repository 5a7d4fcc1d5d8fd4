//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `relaydash.toml` in the working directory, or at the path named
//! by `RELAYDASH_CONFIG`. Every field has a default so the file is optional.
//! Environment variables take precedence over file values.

use serde::Deserialize;

use relaydash_adapter_relay_reqwest::{PassengerConfig, RelayConfig};

const DEFAULT_PATH: &str = "relaydash.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Operator credentials.
    pub auth: AuthConfig,
    /// Relay server endpoints.
    pub relay: RelayConfig,
    /// Passenger directory endpoint.
    pub passengers: PassengerConfig,
    /// Dashboard page settings.
    pub dashboard: DashboardConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// The single operator account.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Seconds between automatic page reloads.
    pub refresh_seconds: u32,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("RELAYDASH_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("RELAYDASH_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("RELAYDASH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("RELAYDASH_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("RELAYDASH_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RELAYDASH_USERNAME") {
            self.auth.username = val;
        }
        if let Some(val) = var("RELAYDASH_PASSWORD") {
            self.auth.password = val;
        }
        if let Some(val) = var("RELAYDASH_RELAY_URL") {
            self.relay.base_url = val;
        }
        if let Some(val) = var("RELAYDASH_PASSENGERS_URL") {
            self.passengers.base_url = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.auth.username.is_empty() || self.auth.password.is_empty() {
            return Err(ConfigError::Validation(
                "auth username and password must be set".to_string(),
            ));
        }
        if self.dashboard.refresh_seconds == 0 {
            return Err(ConfigError::Validation(
                "dashboard refresh_seconds must be non-zero".to_string(),
            ));
        }
        for (name, secs) in [
            ("relay.request_timeout_secs", self.relay.request_timeout_secs),
            ("passengers.request_timeout_secs", self.passengers.request_timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::Validation(format!("{name} must be non-zero")));
            }
        }
        for (name, url) in [
            ("relay.base_url", &self.relay.base_url),
            ("passengers.base_url", &self.passengers.base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be an http(s) URL, got {url:?}"
                )));
            }
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "relaydashd=info,relaydash=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "jlatransport".to_string(),
            password: "transjla".to_string(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { refresh_seconds: 5 }
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML file could not be parsed.
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The config file could not be read.
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    /// A value failed validation.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
