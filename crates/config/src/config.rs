//! Core configuration structures for the offerbot trade engine

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Record service configuration
    #[serde(default)]
    pub record_api: RecordApiConfig,

    /// Trading network configuration
    #[serde(default)]
    pub steam: SteamConfig,

    /// Escrow policy configuration
    #[serde(default)]
    pub escrow: EscrowConfig,

    /// Job and event intake configuration
    #[serde(default)]
    pub intake: IntakeConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Record service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordApiConfig {
    /// Base URL of the record service (e.g., "https://records.example.com")
    #[serde(default)]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Trading network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteamConfig {
    /// App whose items are traded
    #[serde(default = "default_app_id")]
    pub app_id: u32,

    /// Inventory context within the app
    #[serde(default = "default_context_id")]
    pub context_id: u64,

    /// Only consider tradable items when loading inventories
    #[serde(default = "default_true")]
    pub tradable_only: bool,
}

/// Escrow policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscrowConfig {
    /// Longest escrow hold accepted on either side, in days
    #[serde(default)]
    pub max_accepted_days: u32,
}

/// Job and event intake configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Buffered capacity of the trade job channel
    #[serde(default = "default_queue_capacity")]
    pub job_queue_capacity: usize,

    /// Buffered capacity of the lifecycle event channel
    #[serde(default = "default_queue_capacity")]
    pub event_queue_capacity: usize,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    30000
}

fn default_app_id() -> u32 {
    730
}

fn default_context_id() -> u64 {
    2
}

fn default_queue_capacity() -> usize {
    64
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for RecordApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            app_id: default_app_id(),
            context_id: default_context_id(),
            tradable_only: default_true(),
        }
    }
}

impl Default for EscrowConfig {
    fn default() -> Self {
        Self {
            max_accepted_days: 0,
        }
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            job_queue_capacity: default_queue_capacity(),
            event_queue_capacity: default_queue_capacity(),
        }
    }
}
