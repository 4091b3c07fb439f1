//! Promo day parsing
//!
//! Turns free-form weekday specs ("Daily", "Mon-Fri", "Tuesday") into a
//! set of weekday indices, 0 = Sunday.

use serde::{Serialize, Serializer};

const FULL_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

const EVERY_DAY: [&str; 4] = ["daily", "7 days", "everyday", "every day"];

/// Set of weekday indices in `[0, 6]`, 0 = Sunday
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);
    pub const ALL: WeekdaySet = WeekdaySet(0b111_1111);

    pub fn single(day: u8) -> Self {
        let mut set = Self::EMPTY;
        set.insert(day);
        set
    }

    pub fn insert(&mut self, day: u8) {
        if day < 7 {
            self.0 |= 1 << day;
        }
    }

    pub fn contains(&self, day: u8) -> bool {
        day < 7 && self.0 & (1 << day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..7u8).filter(move |d| self.contains(*d))
    }
}

impl FromIterator<u8> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

type DayMatcher = fn(&str) -> Option<WeekdaySet>;

/// Tried in order; the first matcher returning `Some` wins.
const MATCHERS: [DayMatcher; 3] = [match_every_day, match_range, match_single_day];

/// Parse a promo day spec. Unrecognized input yields an empty set.
pub fn parse_days(spec: &str) -> WeekdaySet {
    let normalized = spec.trim().to_lowercase();
    if normalized.is_empty() {
        return WeekdaySet::EMPTY;
    }

    MATCHERS
        .iter()
        .find_map(|matcher| matcher(&normalized))
        .unwrap_or(WeekdaySet::EMPTY)
}

fn match_every_day(spec: &str) -> Option<WeekdaySet> {
    EVERY_DAY.contains(&spec).then_some(WeekdaySet::ALL)
}

/// "Mon-Fri", wrapping past Saturday ("Fri-Mon" = Fri, Sat, Sun, Mon)
fn match_range(spec: &str) -> Option<WeekdaySet> {
    let (start, end) = spec.split_once(['-', '–'])?;
    let start = weekday_index(start.trim())?;
    let end = weekday_index(end.trim())?;

    let mut set = WeekdaySet::single(start);
    let mut day = start;
    while day != end {
        day = (day + 1) % 7;
        set.insert(day);
    }
    Some(set)
}

fn match_single_day(spec: &str) -> Option<WeekdaySet> {
    weekday_index(spec).map(WeekdaySet::single)
}

/// Index of a weekday token: at least three letters and a prefix of the
/// full name ("tue", "tues", "tuesday").
fn weekday_index(token: &str) -> Option<u8> {
    if token.len() < 3 || !token.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    FULL_NAMES
        .iter()
        .position(|name| name.starts_with(token))
        .map(|i| i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(set: WeekdaySet) -> Vec<u8> {
        set.iter().collect()
    }

    #[test]
    fn test_every_day_spellings() {
        for spec in ["Daily", "7 days", "EVERYDAY", "every day", "  daily "] {
            assert_eq!(parse_days(spec), WeekdaySet::ALL, "{spec}");
        }
    }

    #[test]
    fn test_ranges() {
        assert_eq!(days(parse_days("Mon-Fri")), vec![1, 2, 3, 4, 5]);
        assert_eq!(days(parse_days("Wed-Sun")), vec![0, 3, 4, 5, 6]);
        assert_eq!(days(parse_days("Monday - Thursday")), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_range_wraps_past_saturday() {
        assert_eq!(parse_days("Fri-Mon"), [5, 6, 0, 1].into_iter().collect());
        assert_eq!(days(parse_days("Sat-Sun")), vec![0, 6]);
    }

    #[test]
    fn test_degenerate_range_is_single_day() {
        assert_eq!(days(parse_days("Tue-Tue")), vec![2]);
    }

    #[test]
    fn test_single_day() {
        assert_eq!(days(parse_days("Tuesday")), vec![2]);
        assert_eq!(days(parse_days("Tue")), vec![2]);
        assert_eq!(days(parse_days("thurs")), vec![4]);
    }

    #[test]
    fn test_unrecognized_is_empty() {
        assert!(parse_days("gibberish").is_empty());
        assert!(parse_days("").is_empty());
        assert!(parse_days("Mo").is_empty());
        assert!(parse_days("Monkey").is_empty());
        assert!(parse_days("Mon-Funday").is_empty());
    }
}
