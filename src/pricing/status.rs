//! Happy hour status machine

use serde::Serialize;

use super::{
    clock::LocalInstant,
    days::{parse_days, WeekdaySet},
    time::{parse_time, TimeOfDay},
    WEEKDAY_LABELS,
};
use crate::models::venue::Venue;

/// Where a venue's promo window stands relative to an instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PromoStatus {
    /// Inside the window today
    Active { minutes_remaining: u32 },
    /// A promo day, window not started yet
    UpcomingToday { minutes_until: u32 },
    /// Next window starts on a later day
    UpcomingFuture {
        /// 0 = Sunday
        weekday: u8,
        /// 1..=7
        days_ahead: u8,
        start: TimeOfDay,
    },
    /// No complete promo window on record
    NoPromo,
    /// Promo window present but not understood
    Unparseable,
}

impl PromoStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, PromoStatus::Active { .. })
    }

    /// Presentation text layered on top of the status
    pub fn countdown(&self) -> Option<String> {
        match *self {
            PromoStatus::Active { minutes_remaining } => {
                Some(format!("{} left", format_minutes(minutes_remaining)))
            }
            PromoStatus::UpcomingToday { minutes_until } => {
                Some(format!("in {}", format_minutes(minutes_until)))
            }
            PromoStatus::UpcomingFuture {
                weekday,
                days_ahead,
                start,
            } => {
                let day = if days_ahead == 1 {
                    "Tomorrow"
                } else {
                    WEEKDAY_LABELS[usize::from(weekday % 7)]
                };
                Some(format!("{} {}", day, start))
            }
            PromoStatus::NoPromo | PromoStatus::Unparseable => None,
        }
    }
}

/// "1h 30m", "2h", "45m"
pub fn format_minutes(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Classify a parsed promo window against `now`.
///
/// An empty day set or a missing bound is `NoPromo`: partial promo data is
/// never active.
pub fn evaluate(
    days: WeekdaySet,
    start: Option<TimeOfDay>,
    end: Option<TimeOfDay>,
    now: LocalInstant,
) -> PromoStatus {
    let (start, end) = match (start, end) {
        (Some(start), Some(end)) if !days.is_empty() => (start, end),
        _ => return PromoStatus::NoPromo,
    };

    let start_minutes = start.minutes_since_midnight();
    let end_minutes = end.minutes_since_midnight();

    if days.contains(now.weekday) {
        if start_minutes <= now.minutes && now.minutes < end_minutes {
            return PromoStatus::Active {
                minutes_remaining: end_minutes - now.minutes,
            };
        }
        if now.minutes < start_minutes {
            return PromoStatus::UpcomingToday {
                minutes_until: start_minutes - now.minutes,
            };
        }
    }

    // Non-empty set: a promo day is always found within a week
    (1..=7u8)
        .map(|ahead| (ahead, (now.weekday + ahead) % 7))
        .find(|(_, day)| days.contains(*day))
        .map(|(days_ahead, weekday)| PromoStatus::UpcomingFuture {
            weekday,
            days_ahead,
            start,
        })
        .unwrap_or(PromoStatus::NoPromo)
}

/// Parse a venue's promo fields and classify them against `now`
pub fn status_for_venue(venue: &Venue, now: LocalInstant) -> PromoStatus {
    let Some((days_spec, start_spec, end_spec)) = venue.promo_fields() else {
        return PromoStatus::NoPromo;
    };

    let days = parse_days(days_spec);
    let start = parse_time(start_spec);
    let end = parse_time(end_spec);

    if days.is_empty() || start.is_none() || end.is_none() {
        tracing::debug!(
            venue_id = venue.id,
            days = days_spec,
            start = start_spec,
            end = end_spec,
            "Unparseable promo window"
        );
        return PromoStatus::Unparseable;
    }

    evaluate(days, start, end, now)
}
