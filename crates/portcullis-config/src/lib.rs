//! Configuration management for Portcullis
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. CLI arguments (highest precedence, applied by the binary)
//! 2. Environment variables (`PORTCULLIS__SECTION__KEY`)
//! 3. portcullis.local.toml (gitignored, local overrides)
//! 4. portcullis.toml (git-tracked, project config)
//! 5. ~/.config/portcullis/config.toml (user defaults)
//! 6. Built-in defaults (lowest precedence)

use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main Portcullis configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortcullisConfig {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_secs: u64,
    /// Adds `Secure` to the session cookie. Enable behind TLS.
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "portcullis_session".to_string(),
            ttl_secs: 3600,
            secure_cookie: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => f.write_str("text"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::ValidationError(format!(
                "unknown log format '{other}' (expected text or json)"
            ))),
        }
    }
}

impl PortcullisConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Parsed bind address.
    pub fn bind_address(&self) -> std::result::Result<SocketAddr, ConfigError> {
        self.server.bind_address.parse().map_err(|e| {
            ConfigError::ValidationError(format!(
                "server.bind_address '{}' is not a socket address: {e}",
                self.server.bind_address
            ))
        })
    }

    /// Checks values the type system cannot.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.bind_address()?;

        if self.session.cookie_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "session.cookie_name must not be empty".to_string(),
            ));
        }
        if self.session.ttl_secs == 0 {
            return Err(ConfigError::ValidationError(
                "session.ttl_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PortcullisConfig::default();
        assert_eq!(config.server.bind_address, "127.0.0.1:3000");
        assert_eq!(config.session.cookie_name, "portcullis_session");
        assert_eq!(config.session.ttl_secs, 3600);
        assert!(!config.session.secure_cookie);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_bind_address() {
        let mut config = PortcullisConfig::default();
        config.server.bind_address = "localhost".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_empty_cookie_name() {
        let mut config = PortcullisConfig::default();
        config.session.cookie_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_ttl() {
        let mut config = PortcullisConfig::default();
        config.session.ttl_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ttl_secs"));
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: PortcullisConfig = toml::from_str(
            r#"
[session]
ttl_secs = 60
"#,
        )
        .unwrap();
        assert_eq!(config.session.ttl_secs, 60);
        assert_eq!(config.session.cookie_name, "portcullis_session");
        assert_eq!(config.server.bind_address, "127.0.0.1:3000");
    }
}
