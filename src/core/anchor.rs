//! Timezone-aware anchoring of (calendar date, wall-clock time) onto absolute
//! instants. All shift-window and lateness math goes through here so that the
//! whole tool agrees on a single business timezone, DST rules included.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolve an IANA timezone name. An unrecognized name is a configuration
/// error surfaced to the caller — no silent UTC fallback.
pub fn parse_tz(name: &str) -> AppResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| AppError::UnknownTimezone(name.to_string()))
}

/// The instant that reads as `date time:00` on a wall clock in `tz`.
///
/// DST policy: an ambiguous local time (fall-back hour) maps to the earlier
/// of the two candidate instants; a nonexistent local time (spring-forward
/// gap) is pushed past the transition. Both choices are deterministic.
pub fn to_instant(date: NaiveDate, time: NaiveTime, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let shifted = naive + Duration::hours(1);
            match tz.from_local_datetime(&shifted) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
                // unreachable for real tzdata; keep a deterministic fallback
                LocalResult::None => Utc.from_utc_datetime(&naive),
            }
        }
    }
}
