//! Configuration management for the offerbot trade engine
//!
//! This crate provides centralized configuration management with support for:
//! - Multiple config formats (TOML, JSON)
//! - Environment variable overrides
//! - Config validation

mod config;
mod loader;
mod validation;

pub use config::*;
pub use loader::*;
pub use validation::*;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(String),

    #[error("Config validation failed: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config library error: {0}")]
    ConfigLibError(#[from] ::config::ConfigError),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
