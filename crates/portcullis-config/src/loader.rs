//! Configuration loader with multi-source merging

use crate::{Paths, PortcullisConfig};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
    env_source: Option<config::Map<String, String>>,
    include_user_config: bool,
}

impl ConfigLoader {
    /// Create a new config loader with default project directory (current dir)
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "PORTCULLIS".to_string(),
            env_source: None,
            include_user_config: true,
        }
    }

    /// Set the project directory
    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the environment variable prefix (default: "PORTCULLIS")
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Read environment overrides from `vars` instead of the process
    /// environment.
    pub fn with_env_source(mut self, vars: config::Map<String, String>) -> Self {
        self.env_source = Some(vars);
        self
    }

    /// Skip ~/.config/portcullis/config.toml.
    pub fn without_user_config(mut self) -> Self {
        self.include_user_config = false;
        self
    }

    /// Load configuration from all sources with proper precedence
    pub fn load(self) -> Result<PortcullisConfig> {
        let mut builder = config::Config::builder();

        // 1. Start with built-in defaults
        let defaults = PortcullisConfig::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. User config (~/.config/portcullis/config.toml)
        if self.include_user_config
            && let Ok(user_config_file) = Paths::new().user_config_file()
        {
            builder = builder.add_source(
                config::File::from(user_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 3. Project config (portcullis.toml)
        builder = builder.add_source(
            config::File::from(Paths::project_config_file(&self.project_dir))
                .required(false)
                .format(config::FileFormat::Toml),
        );

        // 4. Local config (portcullis.local.toml, gitignored)
        builder = builder.add_source(
            config::File::from(Paths::local_config_file(&self.project_dir))
                .required(false)
                .format(config::FileFormat::Toml),
        );

        // 5. Environment variables (PORTCULLIS__SECTION__KEY). Keys contain
        //    underscores, so the separator is doubled.
        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(self.env_source),
        );

        let config = builder.build().context("Failed to build configuration")?;

        let portcullis_config: PortcullisConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        portcullis_config.validate()?;

        Ok(portcullis_config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogFormat;
    use std::fs;
    use tempfile::tempdir;

    fn loader(project_dir: &Path) -> ConfigLoader {
        ConfigLoader::new()
            .with_project_dir(project_dir)
            .without_user_config()
            .with_env_source(config::Map::new())
    }

    #[test]
    fn test_load_defaults() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = loader(temp_dir.path()).load().expect("Failed to load config");

        assert_eq!(config, PortcullisConfig::default());
    }

    #[test]
    fn test_load_project_config() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        fs::write(
            project_dir.join("portcullis.toml"),
            r#"
[server]
bind_address = "0.0.0.0:8080"

[session]
ttl_secs = 900
secure_cookie = true

[logging]
format = "json"
"#,
        )
        .expect("Failed to write config");

        let config = loader(project_dir).load().expect("Failed to load config");

        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.session.ttl_secs, 900);
        assert!(config.session.secure_cookie);
        assert_eq!(config.session.cookie_name, "portcullis_session");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_local_overrides() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        fs::write(
            project_dir.join("portcullis.toml"),
            "[server]\nbind_address = \"127.0.0.1:3000\"\n",
        )
        .expect("Failed to write project config");
        fs::write(
            project_dir.join("portcullis.local.toml"),
            "[server]\nbind_address = \"127.0.0.1:9999\"\n",
        )
        .expect("Failed to write local config");

        let config = loader(project_dir).load().expect("Failed to load config");

        assert_eq!(config.server.bind_address, "127.0.0.1:9999");
    }

    #[test]
    fn test_env_overrides_files() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        fs::write(
            project_dir.join("portcullis.toml"),
            "[session]\nttl_secs = 900\ncookie_name = \"from_file\"\n",
        )
        .expect("Failed to write project config");

        let env = config::Map::from([
            ("PORTCULLIS__SESSION__TTL_SECS".to_string(), "120".to_string()),
            ("PORTCULLIS__LOGGING__LEVEL".to_string(), "debug".to_string()),
        ]);

        let config = loader(project_dir)
            .with_env_source(env)
            .load()
            .expect("Failed to load config");

        assert_eq!(config.session.ttl_secs, 120);
        assert_eq!(config.session.cookie_name, "from_file");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        fs::write(project_dir.join("portcullis.toml"), "[session]\nttl_secs = 0\n")
            .expect("Failed to write project config");

        let err = loader(project_dir).load().unwrap_err();
        assert!(err.to_string().contains("ttl_secs"));
    }
}
