//! Configuration loading from multiple sources

use crate::{AppConfig, ConfigError, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use std::path::Path;

/// Configuration loader with support for multiple formats and sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file
    ///
    /// Supports TOML and JSON formats based on file extension
    pub fn from_file(path: &Path) -> Result<AppConfig> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let content = std::fs::read_to_string(path)?;

        match extension {
            "toml" => Self::from_toml(&content),
            "json" => Self::from_json(&content),
            _ => Err(ConfigError::LoadError(format!(
                "Unsupported file extension: {}",
                extension
            ))),
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<AppConfig> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    /// Load configuration from JSON string
    pub fn from_json(content: &str) -> Result<AppConfig> {
        serde_json::from_str(content).map_err(ConfigError::from)
    }

    /// Load configuration from environment variables
    ///
    /// Uses default prefix "OFFERBOT"
    pub fn from_env() -> Result<AppConfig> {
        Self::from_env_with_prefix("OFFERBOT")
    }

    /// Load configuration from environment variables with custom prefix
    ///
    /// Sections and keys are separated by double underscores so keys may
    /// themselves contain underscores.
    /// For example: OFFERBOT__RECORD_API__BASE_URL=https://records.example.com
    pub fn from_env_with_prefix(prefix: &str) -> Result<AppConfig> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize().map_err(ConfigError::from)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables with the given prefix override the
    /// corresponding file keys one by one.
    pub fn from_file_with_env(path: &Path, env_prefix: &str) -> Result<AppConfig> {
        Self::builder()
            .add_file(path, true)
            .add_env(env_prefix)
            .build()
    }

    /// Build configuration using the config crate's builder pattern
    ///
    /// This allows for more complex configuration scenarios with multiple sources
    pub fn builder() -> ConfigLoaderBuilder {
        ConfigLoaderBuilder {
            builder: Config::builder(),
        }
    }
}

/// Builder for complex configuration loading scenarios
pub struct ConfigLoaderBuilder {
    builder: ConfigBuilder<config::builder::DefaultState>,
}

impl ConfigLoaderBuilder {
    /// Add a configuration file source
    pub fn add_file(mut self, path: &Path, required: bool) -> Self {
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => FileFormat::Json,
            _ => FileFormat::Toml, // Default to TOML
        };

        self.builder = self
            .builder
            .add_source(File::from(path).format(format).required(required));
        self
    }

    /// Add environment variable source with prefix
    pub fn add_env(mut self, prefix: &str) -> Self {
        self.builder = self.builder.add_source(
            Environment::with_prefix(prefix)
                .separator("__")
                .try_parsing(true),
        );
        self
    }

    /// Set a default value for a key
    pub fn set_default(mut self, key: &str, value: &str) -> Self {
        self.builder = self.builder.set_default(key, value).unwrap();
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<AppConfig> {
        let config = self.builder.build()?;
        config.try_deserialize().map_err(ConfigError::from)
    }
}
