//! Effective price resolution

use rust_decimal::Decimal;
use serde::Serialize;

use super::status::PromoStatus;
use crate::models::venue::Venue;

/// The single price shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectivePricing {
    /// `None` is "unpriced", distinct from any numeric price
    pub effective_price: Option<Decimal>,
    pub is_promo_active: bool,
}

/// Promo price while the window is active and a promo price exists,
/// otherwise the base price.
pub fn resolve(venue: &Venue, status: &PromoStatus) -> EffectivePricing {
    match (status, venue.promo_price) {
        (PromoStatus::Active { .. }, Some(promo)) => EffectivePricing {
            effective_price: Some(promo),
            is_promo_active: true,
        },
        _ => EffectivePricing {
            effective_price: venue.base_price,
            is_promo_active: false,
        },
    }
}
