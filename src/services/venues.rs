//! Venue listing service
//!
//! Every request snapshots "now" once and decorates the whole catalog
//! against that single instant.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::venue::{Venue, VenueView},
    pricing::{resolve, status_for_venue, LocalInstant, MarketClock, PromoStatus},
    repository::CatalogSource,
};

/// Listing filters
#[derive(Debug, Clone, Default)]
pub struct VenueFilter {
    /// Only venues whose promo price applies right now
    pub promo_active: bool,
    /// Case-insensitive suburb match
    pub suburb: Option<String>,
}

/// Attach status, effective price and countdown to a venue
pub fn decorate(venue: Venue, now: LocalInstant) -> VenueView {
    let status = status_for_venue(&venue, now);
    let pricing = resolve(&venue, &status);
    VenueView::new(venue, status, pricing)
}

/// Listing order: cheapest effective price first, unpriced last, then name
pub fn sort_for_listing(views: &mut [VenueView]) {
    views.sort_by(|a, b| {
        let by_price = match (a.effective_price, b.effective_price) {
            (Some(pa), Some(pb)) => pa.cmp(&pb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_price
            .then_with(|| a.venue.name.cmp(&b.venue.name))
            .then(a.venue.id.cmp(&b.venue.id))
    });
}

#[derive(Clone)]
pub struct VenuesService {
    catalog: Arc<dyn CatalogSource>,
    clock: MarketClock,
}

impl VenuesService {
    pub fn new(catalog: Arc<dyn CatalogSource>, clock: MarketClock) -> Self {
        Self { catalog, clock }
    }

    /// Decorated venues in listing order
    pub async fn list(&self, filter: &VenueFilter, now: DateTime<Utc>) -> AppResult<Vec<VenueView>> {
        let local = self.clock.local_instant(now);
        let suburb = filter.suburb.as_deref().map(str::to_lowercase);

        let mut views: Vec<VenueView> = self
            .catalog
            .load()
            .await?
            .into_iter()
            .filter(|v| match &suburb {
                Some(s) => v.suburb.as_deref().map(str::to_lowercase).as_ref() == Some(s),
                None => true,
            })
            .map(|v| decorate(v, local))
            .filter(|view| !filter.promo_active || view.is_promo_active)
            .collect();

        sort_for_listing(&mut views);
        Ok(views)
    }

    /// One decorated venue
    pub async fn get(&self, id: i64, now: DateTime<Utc>) -> AppResult<VenueView> {
        let local = self.clock.local_instant(now);
        self.catalog
            .load()
            .await?
            .into_iter()
            .find(|v| v.id == id)
            .map(|v| decorate(v, local))
            .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))
    }

    /// Venues whose happy hour starts today within `within_minutes`,
    /// soonest first. Feeds the "starting soon" notifications.
    pub async fn starting_soon(
        &self,
        within_minutes: u32,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<VenueView>> {
        let local = self.clock.local_instant(now);

        let mut soon: Vec<(u32, VenueView)> = self
            .catalog
            .load()
            .await?
            .into_iter()
            .map(|v| decorate(v, local))
            .filter_map(|view| {
                let status = view.promo_status;
                match status {
                    PromoStatus::UpcomingToday { minutes_until } if minutes_until <= within_minutes => {
                        Some((minutes_until, view))
                    }
                    _ => None,
                }
            })
            .collect();

        soon.sort_by(|(ma, a), (mb, b)| ma.cmp(mb).then(a.venue.id.cmp(&b.venue.id)));
        tracing::debug!("{} venues start happy hour within {}m", soon.len(), within_minutes);
        Ok(soon.into_iter().map(|(_, view)| view).collect())
    }
}
