//! Pick of the Day
//!
//! Scores every eligible venue from its price, promo availability and a
//! date-seeded price band rotation, then takes the top two. Everything
//! that looks random is integer arithmetic over the date and venue ids,
//! so the same catalog and date always give the same pick.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::{
    clock::LocalInstant,
    days::parse_days,
    status::{status_for_venue, PromoStatus},
    time::parse_time,
    PricingError,
};
use crate::models::{daily_pick::DailyPick, venue::Venue};

const PRICE_WEIGHT: f64 = 50.0;
const PROMO_WINDOW_BONUS: f64 = 15.0;
const PROMO_PRICE_BONUS: f64 = 10.0;
const TIER_MATCH_BONUS: f64 = 25.0;
const TIER_NEIGHBOUR_BONUS: f64 = 10.0;
const TIE_THRESHOLD: f64 = 0.5;

/// One eligible venue and its score for the day
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredVenue {
    pub venue_id: i64,
    /// Position in the ascending base price order
    pub price_rank: usize,
    pub score: f64,
}

/// Eligible venues ordered best first for one date. Only built by
/// `rank_daily`, which never produces an empty ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRanking {
    date: NaiveDate,
    seed: i64,
    ranked: Vec<ScoredVenue>,
}

impl DailyRanking {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn ranked(&self) -> &[ScoredVenue] {
        &self.ranked
    }

    pub fn winner_id(&self) -> i64 {
        self.ranked[0].venue_id
    }

    pub fn runner_up_id(&self) -> Option<i64> {
        self.ranked.get(1).map(|v| v.venue_id)
    }
}

/// Seed derived from the calendar date alone: year + month + day
pub fn date_seed(date: NaiveDate) -> i64 {
    i64::from(date.year()) + i64::from(date.month()) + i64::from(date.day())
}

/// Tie-break hash, stable for an `(id, seed)` pair
pub fn tie_break_hash(venue_id: i64, seed: i64) -> i64 {
    venue_id.wrapping_mul(seed).rem_euclid(1000)
}

/// Rank the eligible venues for `date`.
///
/// Fails with `NoEligibleVenues` when no venue is verified and priced.
pub fn rank_daily(catalog: &[Venue], date: NaiveDate) -> Result<DailyRanking, PricingError> {
    let mut eligible: Vec<(&Venue, Decimal)> = catalog
        .iter()
        .filter(|v| v.price_verified)
        .filter_map(|v| v.base_price.map(|price| (v, price)))
        .collect();

    if eligible.is_empty() {
        return Err(PricingError::NoEligibleVenues { date });
    }

    // Equal prices fall back to id so catalog order never matters
    eligible.sort_by(|(a, pa), (b, pb)| pa.cmp(pb).then(a.id.cmp(&b.id)));

    let seed = date_seed(date);
    let target_tier = seed.rem_euclid(10);
    let min = to_f64(eligible[0].1);
    let max = to_f64(eligible[eligible.len() - 1].1);
    let spread = if max - min > 0.0 { max - min } else { 1.0 };

    let mut ranked: Vec<ScoredVenue> = eligible
        .iter()
        .enumerate()
        .map(|(i, (venue, price))| {
            let price_score = (max - to_f64(*price)) / spread * PRICE_WEIGHT;
            let tier = (i % 10) as i64;
            let variety = if tier == target_tier {
                TIER_MATCH_BONUS
            } else if (tier - target_tier).abs() <= 1 {
                TIER_NEIGHBOUR_BONUS
            } else {
                0.0
            };
            ScoredVenue {
                venue_id: venue.id,
                price_rank: i,
                score: price_score + promo_score(venue) + variety,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.venue_id.cmp(&b.venue_id)));

    if ranked.len() > 1 && ranked[0].score - ranked[1].score < TIE_THRESHOLD {
        let first = tie_break_hash(ranked[0].venue_id, seed);
        let second = tie_break_hash(ranked[1].venue_id, seed);
        if second > first {
            tracing::trace!(
                winner = ranked[1].venue_id,
                over = ranked[0].venue_id,
                seed,
                "Daily pick decided by tie-break"
            );
            ranked.swap(0, 1);
        }
    }

    Ok(DailyRanking { date, seed, ranked })
}

/// Rank `catalog` for `date` and explain the winner against `now`
pub fn select_daily(
    catalog: &[Venue],
    date: NaiveDate,
    now: LocalInstant,
) -> Result<DailyPick, PricingError> {
    let ranking = rank_daily(catalog, date)?;
    let winner = catalog
        .iter()
        .find(|v| v.id == ranking.winner_id())
        .ok_or(PricingError::NoEligibleVenues { date })?;

    Ok(DailyPick {
        winner_id: ranking.winner_id(),
        runner_up_id: ranking.runner_up_id(),
        reason: explain_pick(winner, catalog, now),
        generated_for_date: date,
    })
}

/// Human readable "why this pick". Has no effect on the selection.
pub fn explain_pick(winner: &Venue, catalog: &[Venue], now: LocalInstant) -> String {
    let status = status_for_venue(winner, now);

    if let (Some(promo), Some(countdown)) = (winner.promo_price, status.countdown()) {
        match status {
            PromoStatus::Active { .. } => {
                return format!("Happy hour on now: {} pints, {}", money(promo), countdown)
            }
            PromoStatus::UpcomingToday { .. } => {
                return format!("Happy hour starts {} with {} pints", countdown, money(promo))
            }
            _ => {}
        }
    }

    let Some(price) = winner.base_price else {
        return "Featured venue of the day".to_string();
    };

    let cheapest = catalog
        .iter()
        .filter(|v| v.is_eligible())
        .filter_map(|v| v.base_price)
        .min();
    if cheapest == Some(price) {
        return format!("Cheapest verified pint in town at {}", money(price));
    }

    match winner.beer_type.as_deref().map(str::trim) {
        Some(beer) if !beer.is_empty() => format!("Pouring {} for {}", beer, money(price)),
        _ => format!("Solid value at {} a pint", money(price)),
    }
}

/// A promo window counts once all three fields parse
fn promo_score(venue: &Venue) -> f64 {
    let Some((days, start, end)) = venue.promo_fields() else {
        return 0.0;
    };
    if parse_days(days).is_empty() || parse_time(start).is_none() || parse_time(end).is_none() {
        return 0.0;
    }
    match venue.promo_price {
        Some(_) => PROMO_WINDOW_BONUS + PROMO_PRICE_BONUS,
        None => PROMO_WINDOW_BONUS,
    }
}

fn to_f64(price: Decimal) -> f64 {
    price.to_f64().unwrap_or_default()
}

fn money(price: Decimal) -> String {
    format!("${:.2}", price)
}
