//! Market civil time
//!
//! Every comparison in the engine happens in one fixed timezone, the venue
//! market's, regardless of where the caller's clock lives.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

use super::PricingError;

/// Converts UTC instants into market-local weekday / time / date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketClock {
    tz: Tz,
}

impl MarketClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build from an IANA zone name. There is no fallback zone.
    pub fn from_name(name: &str) -> Result<Self, PricingError> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| PricingError::UnknownTimezone(name.to_string()))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Snapshot of `now` in market time, shared by every venue evaluated
    /// for one request
    pub fn local_instant(&self, now: DateTime<Utc>) -> LocalInstant {
        let local = now.with_timezone(&self.tz);
        LocalInstant {
            date: local.date_naive(),
            weekday: local.weekday().num_days_from_sunday() as u8,
            minutes: local.hour() * 60 + local.minute(),
        }
    }

    /// Market calendar date, the daily pick cache key
    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.tz).date_naive()
    }
}

impl Default for MarketClock {
    fn default() -> Self {
        Self::new(chrono_tz::Australia::Perth)
    }
}

/// A point in market civil time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalInstant {
    pub date: NaiveDate,
    /// 0 = Sunday
    pub weekday: u8,
    pub minutes: u32,
}

impl LocalInstant {
    /// Build directly from local wall-clock fields
    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> Self {
        Self {
            date,
            weekday: date.weekday().num_days_from_sunday() as u8,
            minutes: hour * 60 + minute,
        }
    }
}
