//! Promo time-of-day parsing ("16:00", "16:00:00", "4pm", "4:30pm")

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static CLOCK_24H: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").expect("valid 24h regex"));

static CLOCK_12H: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})(?::(\d{2}))?\s*([ap])\.?m\.?$").expect("valid 12h regex")
});

/// Wall-clock time of day, minute precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }
}

/// Rendered the way venues advertise it: "4:00pm", "12:30am"
impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.hour < 12 { "am" } else { "pm" };
        let hour = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        write!(f, "{}:{:02}{}", hour, self.minute, suffix)
    }
}

type TimeMatcher = fn(&str) -> Option<TimeOfDay>;

const MATCHERS: [TimeMatcher; 2] = [match_24h, match_12h];

/// Parse a promo time. Returns `None` for anything unrecognized.
pub fn parse_time(spec: &str) -> Option<TimeOfDay> {
    let normalized = spec.trim().to_lowercase();
    MATCHERS.iter().find_map(|matcher| matcher(&normalized))
}

fn match_24h(spec: &str) -> Option<TimeOfDay> {
    let caps = CLOCK_24H.captures(spec)?;
    let hour: u8 = caps[1].parse().ok()?;
    let minute: u8 = caps[2].parse().ok()?;
    if let Some(seconds) = caps.get(3) {
        // Seconds are dropped but must still be a valid field
        if seconds.as_str().parse::<u8>().ok()? >= 60 {
            return None;
        }
    }
    TimeOfDay::new(hour, minute)
}

fn match_12h(spec: &str) -> Option<TimeOfDay> {
    let caps = CLOCK_12H.captures(spec)?;
    let hour: u8 = caps[1].parse().ok()?;
    let minute: u8 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    if !(1..=12).contains(&hour) {
        return None;
    }
    let hour = match (&caps[3], hour) {
        ("a", 12) => 0,
        ("a", h) => h,
        ("p", 12) => 12,
        (_, h) => h + 12,
    };
    TimeOfDay::new(hour, minute)
}
