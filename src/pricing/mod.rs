//! Temporal pricing engine
//!
//! Pure computations over a venue catalog snapshot and a single "now":
//! promo window parsing, happy hour status, effective prices and the
//! deterministic daily pick. Nothing in here reads a clock or does I/O.

pub mod clock;
pub mod daily_pick;
pub mod days;
pub mod resolver;
pub mod status;
pub mod time;

use chrono::NaiveDate;
use thiserror::Error;

pub use clock::{LocalInstant, MarketClock};
pub use daily_pick::{explain_pick, rank_daily, select_daily, DailyRanking};
pub use days::{parse_days, WeekdaySet};
pub use resolver::{resolve, EffectivePricing};
pub use status::{evaluate, status_for_venue, PromoStatus};
pub use time::{parse_time, TimeOfDay};

/// Errors raised by the pricing engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// No verified, priced venue to pick from
    #[error("No eligible venues for {date}")]
    NoEligibleVenues { date: NaiveDate },

    /// The configured market timezone is not a known IANA zone
    #[error("Unknown market timezone: {0}")]
    UnknownTimezone(String),
}

/// Short weekday labels indexed from Sunday
pub(crate) const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
