//! Pintprice
//!
//! Venue pricing server: live happy hour status, effective pint prices and
//! a deterministic Pick of the Day, computed in the venue market's own
//! timezone over a catalog snapshot supplied by an external store.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<dyn repository::CatalogSource>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire services over `catalog` using the market clock from `config`
    pub fn new(
        config: AppConfig,
        catalog: Arc<dyn repository::CatalogSource>,
    ) -> Result<Self, pricing::PricingError> {
        let clock = config.market_clock()?;
        let services = services::Services::new(
            catalog.clone(),
            clock,
            config.daily_pick.cache_enabled,
        );
        Ok(Self {
            config: Arc::new(config),
            catalog,
            services: Arc::new(services),
        })
    }
}
