//! Time utilities: parsing HH:MM, minute-of-day math, circular distance.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn parse_required_time(s: &str) -> AppResult<NaiveTime> {
    parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))
}

pub fn minute_of_day(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Wraparound distance between two minute-of-day values, so 23:30 and 00:30
/// are 60 minutes apart, not 1380.
pub fn circular_minute_distance(a: u32, b: u32) -> u32 {
    let diff = a.abs_diff(b);
    diff.min(1440 - diff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hh_mm() {
        assert_eq!(
            parse_time("07:15"),
            Some(NaiveTime::from_hms_opt(7, 15, 0).unwrap())
        );
        assert!(parse_time("7:15pm").is_none());
        assert!(parse_time("25:00").is_none());
    }

    #[test]
    fn circular_distance_wraps_at_midnight() {
        let a = minute_of_day(NaiveTime::from_hms_opt(23, 30, 0).unwrap());
        let b = minute_of_day(NaiveTime::from_hms_opt(0, 30, 0).unwrap());
        assert_eq!(circular_minute_distance(a, b), 60);
        assert_eq!(circular_minute_distance(b, a), 60);
        assert_eq!(circular_minute_distance(a, a), 0);
    }
}
