//! Formatting utilities used for CLI output.
//!
//! Two distinct duration contracts exist and must not be mixed:
//! elapsed time rounds *down* (you have not worked the 8th hour until it is
//! over), lateness/earliness rounds *up* (one second late is a late minute).

/// Ceiling of ms / 60000, clamped at zero. Used per shift instance before
/// summing monthly late/early totals — never sum raw milliseconds and round
/// once, the reports are defined on per-instance ceiled minutes.
pub fn ceil_minutes(ms: i64) -> i64 {
    if ms <= 0 {
        0
    } else {
        (ms + 59_999) / 60_000
    }
}

pub fn floor_minutes(ms: i64) -> i64 {
    if ms <= 0 { 0 } else { ms / 60_000 }
}

fn fmt_hm(total_minutes: i64) -> String {
    let h = total_minutes / 60;
    let m = total_minutes % 60;
    if h > 0 {
        format!("{}h {}m", h, m)
    } else {
        format!("{}m", m)
    }
}

/// Elapsed-duration rendering (floor): "1h 5m", "45m", "0m".
pub fn fmt_duration_elapsed(ms: i64) -> String {
    fmt_hm(floor_minutes(ms))
}

/// Lateness/early-departure rendering (ceiling): 61s late prints as "2m".
pub fn fmt_duration_late(ms: i64) -> String {
    fmt_hm(ceil_minutes(ms))
}
