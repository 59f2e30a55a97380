//! Shift-window resolution and calendar-day attribution.
//!
//! Both clock actions and every report recomputation resolve windows through
//! this one module, so write-time and read-time attribution can never drift
//! apart.

use crate::core::anchor;
use crate::errors::{AppError, AppResult};
use crate::models::shift::ShiftDefinition;
use crate::utils::time::minute_of_day;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy)]
pub struct ShiftWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub crosses_midnight: bool,
}

/// Absolute window of `def` anchored on `date`. A crossing shift ends on the
/// calendar day after its nominal date.
pub fn resolve(date: NaiveDate, def: &ShiftDefinition, tz: Tz) -> AppResult<ShiftWindow> {
    let crosses = def.crosses_midnight();
    let end_date = if crosses {
        date.succ_opt()
            .ok_or_else(|| AppError::InvalidDate(date.to_string()))?
    } else {
        date
    };

    Ok(ShiftWindow {
        start: anchor::to_instant(date, def.start, tz),
        end: anchor::to_instant(end_date, def.end, tz),
        crosses_midnight: crosses,
    })
}

/// Decide which calendar day an event belongs to.
///
/// `prev_day_shift` is the shift selected on the day *before* the event's
/// literal local date — always the day row's selected code, never a code
/// embedded in a log row. An event in the small hours still belongs to the
/// previous day when that day's shift crosses midnight and the event's
/// wall-clock time falls before the shift's nominal end.
///
/// This runs at write time and the result is persisted on the event; read
/// paths reuse the stored date rather than re-deciding.
pub fn attribute_event_date(
    instant: DateTime<Utc>,
    tz: Tz,
    prev_day_shift: Option<&ShiftDefinition>,
) -> NaiveDate {
    let local = instant.with_timezone(&tz);
    let date = local.date_naive();

    if let Some(def) = prev_day_shift
        && def.crosses_midnight()
        && minute_of_day(local.time()) < def.end_minutes()
        && let Some(prev) = date.pred_opt()
    {
        return prev;
    }

    date
}
