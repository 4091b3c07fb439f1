//! Pick of the Day service
//!
//! Rankings for the current market-local date are cached. Other dates are
//! ranked on demand. The reason text is rebuilt on every request since it
//! depends on the current instant.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{
        daily_pick::{DailyPick, DailyPickResponse},
        venue::Venue,
    },
    pricing::{explain_pick, rank_daily, select_daily, DailyRanking, LocalInstant, MarketClock},
    repository::CatalogSource,
    services::venues::decorate,
};

/// Cached rankings further than this from the newest entry are dropped
const CACHE_RETENTION_DAYS: i64 = 7;

#[derive(Clone)]
pub struct DailyPickService {
    catalog: Arc<dyn CatalogSource>,
    clock: MarketClock,
    cache: Option<Arc<RwLock<HashMap<NaiveDate, DailyRanking>>>>,
}

impl DailyPickService {
    pub fn new(catalog: Arc<dyn CatalogSource>, clock: MarketClock, cache_enabled: bool) -> Self {
        Self {
            catalog,
            clock,
            cache: cache_enabled.then(|| Arc::new(RwLock::new(HashMap::new()))),
        }
    }

    /// Pick for `date`, or for today in market time
    pub async fn pick(
        &self,
        date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> AppResult<DailyPickResponse> {
        let local = self.clock.local_instant(now);
        let date = date.unwrap_or(local.date);
        let catalog = self.catalog.load().await?;

        let pick = match &self.cache {
            Some(cache) if date == local.date => self.cached_pick(cache, &catalog, local).await?,
            _ => select_daily(&catalog, date, local)?,
        };

        tracing::info!(
            date = %pick.generated_for_date,
            winner = pick.winner_id,
            runner_up = ?pick.runner_up_id,
            "Daily pick"
        );

        let find = |id: i64| catalog.iter().find(|v| v.id == id).cloned();
        let winner = find(pick.winner_id)
            .ok_or_else(|| AppError::Internal("Daily pick winner vanished".into()))?;

        Ok(DailyPickResponse {
            date: pick.generated_for_date,
            winner: decorate(winner, local),
            reason: pick.reason,
            runner_up: pick.runner_up_id.and_then(find),
        })
    }

    async fn cached_pick(
        &self,
        cache: &RwLock<HashMap<NaiveDate, DailyRanking>>,
        catalog: &[Venue],
        local: LocalInstant,
    ) -> AppResult<DailyPick> {
        let date = local.date;
        let cached = cache.read().await.get(&date).cloned();

        let ranking = match cached {
            Some(ranking) if still_eligible(&ranking, catalog) => {
                tracing::debug!("Daily pick cache hit for {}", date);
                ranking
            }
            _ => {
                let ranking = rank_daily(catalog, date)?;
                let mut cache = cache.write().await;
                cache.retain(|d, _| {
                    d.signed_duration_since(date).num_days().abs() <= CACHE_RETENTION_DAYS
                });
                cache.insert(date, ranking.clone());
                ranking
            }
        };

        let winner = catalog
            .iter()
            .find(|v| v.id == ranking.winner_id())
            .ok_or_else(|| AppError::Internal("Daily pick winner vanished".into()))?;

        Ok(DailyPick {
            winner_id: ranking.winner_id(),
            runner_up_id: ranking.runner_up_id(),
            reason: explain_pick(winner, catalog, local),
            generated_for_date: date,
        })
    }
}

/// Winner and runner-up are both still in the snapshot and eligible
fn still_eligible(ranking: &DailyRanking, catalog: &[Venue]) -> bool {
    let eligible = |id: i64| catalog.iter().any(|v| v.id == id && v.is_eligible());
    eligible(ranking.winner_id()) && ranking.runner_up_id().map_or(true, eligible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::venue::fixtures::*;
    use crate::pricing::PricingError;
    use crate::repository::MockCatalogSource;
    use chrono::TimeZone;

    fn perth(y: i32, m: u32, d: u32, hour: u32) -> DateTime<Utc> {
        chrono_tz::Australia::Perth
            .with_ymd_and_hms(y, m, d, hour, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn venues() -> Vec<Venue> {
        (1..=6).map(|id| venue(id, price(800 + id * 25))).collect()
    }

    fn service_with(mock: MockCatalogSource, cache_enabled: bool) -> DailyPickService {
        DailyPickService::new(Arc::new(mock), MarketClock::default(), cache_enabled)
    }

    #[tokio::test]
    async fn test_date_defaults_to_market_local_date() {
        let mut mock = MockCatalogSource::new();
        mock.expect_load().returning(|| Ok(venues()));
        let svc = service_with(mock, false);

        // 01:00 on 26 Feb in Perth is still 25 Feb in UTC
        let response = svc.pick(None, perth(2025, 2, 26, 1)).await.unwrap();
        assert_eq!(response.date, NaiveDate::from_ymd_opt(2025, 2, 26).unwrap());
    }

    #[tokio::test]
    async fn test_same_date_same_pick() {
        let mut mock = MockCatalogSource::new();
        mock.expect_load().times(2).returning(|| Ok(venues()));
        let svc = service_with(mock, false);

        let day = NaiveDate::from_ymd_opt(2025, 2, 25);
        let morning = svc.pick(day, perth(2025, 2, 25, 0)).await.unwrap();
        let night = svc.pick(day, perth(2025, 2, 25, 23)).await.unwrap();
        assert_eq!(morning.winner.venue.id, night.winner.venue.id);
        assert_eq!(
            morning.runner_up.map(|v| v.id),
            night.runner_up.map(|v| v.id)
        );
    }

    #[tokio::test]
    async fn test_cache_keeps_ranking_for_the_day() {
        let day = NaiveDate::from_ymd_opt(2025, 2, 25);
        let first_catalog = venues();
        let first = select_daily(&first_catalog, day.unwrap(), LocalInstant::at(day.unwrap(), 12, 0))
            .unwrap();

        // Second snapshot adds a venue that would otherwise win outright
        let mut second_catalog = venues();
        let mut bargain = with_promo(venue(50, price(100)), "Daily", "00:00", "23:59");
        bargain.promo_price = price(50);
        second_catalog.push(bargain);

        let mut calls = 0;
        let mut mock = MockCatalogSource::new();
        mock.expect_load().times(2).returning(move || {
            calls += 1;
            Ok(if calls == 1 { venues() } else { second_catalog.clone() })
        });
        let svc = service_with(mock, true);

        let a = svc.pick(day, perth(2025, 2, 25, 12)).await.unwrap();
        let b = svc.pick(day, perth(2025, 2, 25, 13)).await.unwrap();
        assert_eq!(a.winner.venue.id, first.winner_id);
        assert_eq!(b.winner.venue.id, first.winner_id);
    }

    #[tokio::test]
    async fn test_no_eligible_venues_is_unavailable() {
        let mut mock = MockCatalogSource::new();
        mock.expect_load().returning(|| Ok(vec![venue(1, None)]));
        let svc = service_with(mock, true);

        let result = svc.pick(None, perth(2025, 2, 25, 12)).await;
        assert!(matches!(
            result,
            Err(AppError::Pricing(PricingError::NoEligibleVenues { .. }))
        ));
    }

    #[tokio::test]
    async fn test_cached_ranking_dropped_when_venues_lose_prices() {
        let mut calls = 0;
        let mut mock = MockCatalogSource::new();
        mock.expect_load().times(2).returning(move || {
            calls += 1;
            let mut catalog = venues();
            if calls > 1 {
                catalog.iter_mut().for_each(|v| v.base_price = None);
            }
            Ok(catalog)
        });
        let svc = service_with(mock, true);

        assert!(svc.pick(None, perth(2025, 2, 25, 12)).await.is_ok());
        let result = svc.pick(None, perth(2025, 2, 25, 13)).await;
        assert!(matches!(
            result,
            Err(AppError::Pricing(PricingError::NoEligibleVenues { .. }))
        ));
    }

    #[tokio::test]
    async fn test_cached_ranking_dropped_when_winner_unverified() {
        let day = NaiveDate::from_ymd_opt(2025, 2, 25).unwrap();
        let winner = rank_daily(&venues(), day).unwrap().winner_id();

        let mut calls = 0;
        let mut mock = MockCatalogSource::new();
        mock.expect_load().times(2).returning(move || {
            calls += 1;
            let mut catalog = venues();
            if calls > 1 {
                catalog.retain(|v| v.id != winner);
                let mut hidden = venue(winner, price(800 + winner * 25));
                hidden.price_verified = false;
                catalog.push(hidden);
            }
            Ok(catalog)
        });
        let svc = service_with(mock, true);

        let first = svc.pick(None, perth(2025, 2, 25, 12)).await.unwrap();
        let second = svc.pick(None, perth(2025, 2, 25, 13)).await.unwrap();
        assert_eq!(first.winner.venue.id, winner);
        assert_ne!(second.winner.venue.id, winner);
        assert!(second.winner.venue.is_eligible());
    }

    #[tokio::test]
    async fn test_extreme_dates_with_warm_cache() {
        let mut mock = MockCatalogSource::new();
        mock.expect_load().returning(|| Ok(venues()));
        let svc = service_with(mock, true);
        let now = perth(2025, 2, 25, 12);

        svc.pick(None, now).await.unwrap();
        let oldest = svc.pick(Some(NaiveDate::MIN), now).await.unwrap();
        let newest = svc.pick(Some(NaiveDate::MAX), now).await.unwrap();
        assert_eq!(oldest.date, NaiveDate::MIN);
        assert_eq!(newest.date, NaiveDate::MAX);

        let cache = svc.cache.as_ref().unwrap().read().await;
        assert_eq!(cache.len(), 1);
        assert!(cache.contains_key(&NaiveDate::from_ymd_opt(2025, 2, 25).unwrap()));
    }

    #[tokio::test]
    async fn test_cache_stays_bounded() {
        let mut mock = MockCatalogSource::new();
        mock.expect_load().returning(|| Ok(venues()));
        let svc = service_with(mock, true);
        let now = perth(2025, 2, 25, 12);

        // Explicit dates are never cached
        let start = NaiveDate::from_ymd_opt(3000, 12, 31).unwrap();
        for days_back in 0..20 {
            let date = start - chrono::Duration::days(days_back);
            svc.pick(Some(date), now).await.unwrap();
        }
        assert!(svc.cache.as_ref().unwrap().read().await.is_empty());

        // Walking the evaluation instant back keeps only nearby days
        for days_back in 0..30 {
            svc.pick(None, now - chrono::Duration::days(days_back)).await.unwrap();
        }
        let cache = svc.cache.as_ref().unwrap().read().await;
        assert!(cache.len() as i64 <= 2 * CACHE_RETENTION_DAYS + 1);
    }
}
