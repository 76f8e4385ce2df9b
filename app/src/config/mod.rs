//! Configuration management for the Health Tracker app
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: HT__)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub notifications: NotificationConfig,
    pub daily_reset: DailyResetConfig,
    pub seed: SeedConfig,
    #[serde(default)]
    pub events: EventConfig,
}

/// Local notification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Register reminders with the platform at all
    pub enabled: bool,
    /// Ask for notification permission during startup
    pub request_permission_on_launch: bool,
    /// Remove a medication's pending reminders when it is deleted.
    /// Off by default: deleted medications keep their reminders.
    pub cancel_reminders_on_delete: bool,
}

/// Day-boundary reset of the medication "taken" flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyResetConfig {
    pub enabled: bool,
    /// How often the runtime checks whether the local date changed
    pub check_interval_secs: u64,
}

impl DailyResetConfig {
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs.max(1))
    }
}

/// Sample data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub load_sample_data: bool,
}

/// Store event bus configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConfig {
    pub channel_capacity: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self { channel_capacity: 64 }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notifications: NotificationConfig {
                enabled: true,
                request_permission_on_launch: true,
                cancel_reminders_on_delete: false,
            },
            daily_reset: DailyResetConfig {
                enabled: true,
                check_interval_secs: 60,
            },
            seed: SeedConfig {
                load_sample_data: true,
            },
            events: EventConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with HT__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (HT__ prefix)
            // e.g., HT__DAILY_RESET__CHECK_INTERVAL_SECS=30
            .add_source(config::Environment::with_prefix("HT").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
