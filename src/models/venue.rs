//! Venue models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::pricing::{EffectivePricing, PromoStatus};

/// A venue record from the catalog snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub suburb: Option<String>,
    /// Beer poured at the listed price (e.g. "Swan Draught")
    pub beer_type: Option<String>,
    /// Price confirmed by a moderator
    #[serde(default)]
    pub price_verified: bool,
    /// Regular pint price; `None` means unpriced, never zero
    pub base_price: Option<Decimal>,
    pub promo_price: Option<Decimal>,
    /// Free-form day spec ("Daily", "Mon-Fri", "Tuesday")
    pub promo_days: Option<String>,
    /// Free-form time ("16:00", "16:00:00", "4pm")
    pub promo_start: Option<String>,
    pub promo_end: Option<String>,
}

impl Venue {
    /// Usable as daily pick input
    pub fn is_eligible(&self) -> bool {
        self.price_verified && self.base_price.is_some()
    }

    /// Whether any promo field carries data
    pub fn has_promo_fields(&self) -> bool {
        [&self.promo_days, &self.promo_start, &self.promo_end]
            .iter()
            .any(|f| non_blank(f).is_some())
    }

    /// Promo fields when all three are present and non-blank
    pub fn promo_fields(&self) -> Option<(&str, &str, &str)> {
        Some((
            non_blank(&self.promo_days)?,
            non_blank(&self.promo_start)?,
            non_blank(&self.promo_end)?,
        ))
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Venue decorated with its status at the evaluation instant
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VenueView {
    #[serde(flatten)]
    pub venue: Venue,
    /// Price shown to users; `null` reads as "price TBC"
    pub effective_price: Option<Decimal>,
    pub is_promo_active: bool,
    #[schema(value_type = Object)]
    pub promo_status: PromoStatus,
    /// Human readable countdown ("1h 30m left", "in 15m", "Mon 4:00pm")
    pub countdown: Option<String>,
}

impl VenueView {
    pub fn new(venue: Venue, status: PromoStatus, pricing: EffectivePricing) -> Self {
        Self {
            countdown: status.countdown(),
            effective_price: pricing.effective_price,
            is_promo_active: pricing.is_promo_active,
            promo_status: status,
            venue,
        }
    }
}
