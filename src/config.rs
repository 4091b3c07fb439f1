//! Configuration management for Pintprice server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::pricing::{MarketClock, PricingError};

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MarketConfig {
    /// IANA timezone of the venue market
    pub timezone: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// JSON snapshot of the venue catalog
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DailyPickConfig {
    pub cache_enabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationsConfig {
    /// Default look-ahead for "happy hour starting soon"
    pub lead_minutes: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub market: MarketConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub daily_pick: DailyPickConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (e.g. PINTPRICE_MARKET__TIMEZONE)
            .add_source(
                Environment::with_prefix("PINTPRICE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override catalog path from CATALOG_PATH env var if present
            .set_override_option("catalog.path", env::var("CATALOG_PATH").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Market clock for the configured timezone; an unknown zone is fatal
    pub fn market_clock(&self) -> Result<MarketClock, PricingError> {
        MarketClock::from_name(&self.market.timezone)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            timezone: "Australia/Perth".to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "data/venues.json".to_string(),
        }
    }
}

impl Default for DailyPickConfig {
    fn default() -> Self {
        Self { cache_enabled: true }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { lead_minutes: 60 }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            market: MarketConfig::default(),
            catalog: CatalogConfig::default(),
            daily_pick: DailyPickConfig::default(),
            notifications: NotificationsConfig::default(),
        }
    }
}
