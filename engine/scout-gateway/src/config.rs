//! Service configuration management
//!
//! Layers, lowest precedence first: built-in defaults, an optional TOML
//! file, then `SCOUT__SECTION__KEY` environment variables.

use anyhow::{Context, Result};
use fpl_fetcher::{CacheConfig, FetcherConfig};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use crate::DEFAULT_PORT;

/// Prefix for environment overrides, e.g. `SCOUT__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "SCOUT";

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Upstream FPL API settings
    pub fetcher: FetcherConfig,

    /// Payload cache settings
    pub cache: CacheConfig,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (pretty, json, compact)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: DEFAULT_PORT }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid server address {}:{}", self.host, self.port))
    }
}

/// Load configuration from an optional file and the environment
pub fn load_config(config_file: Option<&Path>) -> Result<ScoutConfig> {
    let mut builder = config::Config::builder();

    if let Some(path) = config_file {
        tracing::debug!("Loading configuration from file: {:?}", path);
        builder = builder.add_source(config::File::from(path).required(true));
    }

    let config: ScoutConfig = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()
        .context("Failed to read configuration sources")?
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration
pub fn validate_config(config: &ScoutConfig) -> Result<()> {
    if config.fetcher.timeout_secs == 0 {
        return Err(anyhow::anyhow!("Invalid fetcher timeout: must be at least 1 second"));
    }

    if !config.fetcher.base_url.starts_with("http://") && !config.fetcher.base_url.starts_with("https://") {
        return Err(anyhow::anyhow!("Invalid fetcher base_url: {}", config.fetcher.base_url));
    }

    if config.server.port == 0 {
        return Err(anyhow::anyhow!("Invalid server port: {}", config.server.port));
    }

    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow::anyhow!("Invalid log level: {}", config.logging.level)),
    }

    match config.logging.format.as_str() {
        "json" | "pretty" | "compact" => {}
        _ => return Err(anyhow::anyhow!("Invalid log format: {}", config.logging.format)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ScoutConfig::default();
        validate_config(&config).unwrap();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.fetcher.timeout_secs, fpl_fetcher::DEFAULT_TIMEOUT_SECS);
        assert!(config.cache.enabled);
        assert_eq!(config.server.socket_addr().unwrap().to_string(), "127.0.0.1:8081");
    }

    #[test]
    fn test_load_from_file_keeps_unset_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090

[cache]
ttl_secs = 30

[logging]
format = "json"
"#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.cache.ttl_secs, 30);
        assert!(config.cache.enabled);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/scout.toml"))).is_err());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = ScoutConfig::default();
        config.logging.level = "loud".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = ScoutConfig::default();
        config.fetcher.timeout_secs = 0;
        assert!(validate_config(&config).is_err());

        let mut config = ScoutConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());

        let mut config = ScoutConfig::default();
        config.fetcher.base_url = "ftp://example.com".to_string();
        assert!(validate_config(&config).is_err());
    }
}
