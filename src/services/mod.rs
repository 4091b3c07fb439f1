//! Business logic services

pub mod daily_pick;
pub mod venues;

use std::sync::Arc;

use crate::{pricing::MarketClock, repository::CatalogSource};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub venues: venues::VenuesService,
    pub daily_pick: daily_pick::DailyPickService,
}

impl Services {
    /// Create all services over one catalog source and market clock
    pub fn new(catalog: Arc<dyn CatalogSource>, clock: MarketClock, cache_daily_pick: bool) -> Self {
        Self {
            venues: venues::VenuesService::new(catalog.clone(), clock),
            daily_pick: daily_pick::DailyPickService::new(catalog, clock, cache_daily_pick),
        }
    }
}
